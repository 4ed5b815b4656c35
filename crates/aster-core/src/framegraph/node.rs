// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Typed frame-graph nodes stored in an arena with parent indices.

use super::id::NodeId;
use crate::renderer::api::{AttachmentPoint, MemoryBarrierFlags};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A rectangle in normalized or pixel coordinates, depending on use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// The unit rectangle covering a whole surface.
    pub const UNIT: Rect = Rect::new(0.0, 0.0, 1.0, 1.0);

    /// Creates a rectangle.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

impl Default for Rect {
    fn default() -> Self {
        Rect::UNIT
    }
}

/// How a layer filter treats entities carrying its layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LayerFilterMode {
    /// Keep entities with at least one of the layers.
    #[default]
    AcceptAnyMatchingLayers,
    /// Keep entities with all of the layers.
    AcceptAllMatchingLayers,
    /// Drop entities with at least one of the layers.
    DiscardAnyMatchingLayers,
    /// Drop entities with all of the layers.
    DiscardAllMatchingLayers,
}

/// A criterion used to order render commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortType {
    /// Minimize state changes.
    StateChangeCost,
    /// Farthest first.
    BackToFront,
    /// Group by material.
    Material,
    /// Nearest first.
    FrontToBack,
    /// Group by bound textures.
    Texture,
    /// Group by uniform values.
    Uniform,
}

/// Which buffers a clear affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ClearBufferTypes {
    bits: u8,
}

impl ClearBufferTypes {
    /// Nothing.
    pub const NONE: Self = Self { bits: 0 };
    /// Color buffers.
    pub const COLOR: Self = Self { bits: 1 << 0 };
    /// Depth buffer.
    pub const DEPTH: Self = Self { bits: 1 << 1 };
    /// Stencil buffer.
    pub const STENCIL: Self = Self { bits: 1 << 2 };
    /// Depth and stencil.
    pub const DEPTH_STENCIL: Self = Self {
        bits: Self::DEPTH.bits | Self::STENCIL.bits,
    };
    /// Every buffer.
    pub const ALL: Self = Self {
        bits: Self::COLOR.bits | Self::DEPTH.bits | Self::STENCIL.bits,
    };

    /// Combines two sets.
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Checks whether every bit of `other` is set.
    pub const fn contains(&self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Checks if no buffer is selected.
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl std::ops::BitOr for ClearBufferTypes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

/// Parameters of a clear-buffers node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearBuffersNode {
    /// The buffers to clear.
    pub buffers: ClearBufferTypes,
    /// The color clear value.
    pub clear_color: [f32; 4],
    /// The depth clear value.
    pub clear_depth: f32,
    /// The stencil clear value.
    pub clear_stencil: i32,
    /// Restricts the color clear to one render target output.
    pub color_buffer: Option<NodeId>,
}

impl Default for ClearBuffersNode {
    fn default() -> Self {
        Self {
            buffers: ClearBufferTypes::ALL,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            clear_depth: 1.0,
            clear_stencil: 0,
            color_buffer: None,
        }
    }
}

/// Filtering used when a blit scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlitInterpolation {
    /// Nearest texel.
    #[default]
    Nearest,
    /// Bilinear.
    Linear,
}

/// Parameters of a framebuffer blit node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlitFramebufferNode {
    /// The render target read from, `None` for the default framebuffer.
    pub source: Option<NodeId>,
    /// The render target written to, `None` for the default framebuffer.
    pub destination: Option<NodeId>,
    /// Source rectangle in pixels.
    pub source_rect: Rect,
    /// Destination rectangle in pixels.
    pub destination_rect: Rect,
    /// The attachment read from.
    pub source_attachment: AttachmentPoint,
    /// The attachment written to.
    pub destination_attachment: AttachmentPoint,
    /// Scaling filter.
    pub interpolation: BlitInterpolation,
}

/// A pending request to read back the rendered image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderCaptureRequest {
    /// The caller's identifier for the capture.
    pub capture_id: u32,
    /// The region to capture, `None` for the whole surface.
    pub rect: Option<Rect>,
}

/// The typed payload of a frame-graph node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Selects the camera entity.
    CameraSelector {
        /// The camera entity.
        camera: Option<NodeId>,
    },
    /// Restricts drawn entities by layer.
    LayerFilter {
        /// The layers tested.
        layers: Vec<NodeId>,
        /// How the layers are tested.
        mode: LayerFilterMode,
    },
    /// Restricts drawn entities to those near another entity.
    ProximityFilter {
        /// The reference entity.
        entity: Option<NodeId>,
        /// Maximum distance.
        distance_threshold: f32,
    },
    /// Selects render passes by filter key.
    RenderPassFilter {
        /// Filter keys a pass must carry.
        matches: Vec<NodeId>,
        /// Parameters injected into matching passes.
        parameters: Vec<NodeId>,
    },
    /// Selects techniques by filter key.
    TechniqueFilter {
        /// Filter keys a technique must carry.
        matches: Vec<NodeId>,
        /// Parameters injected into matching techniques.
        parameters: Vec<NodeId>,
    },
    /// Selects the render target drawn into.
    RenderTargetSelector {
        /// The render target.
        target: Option<NodeId>,
        /// The attachment points to draw into, empty for all.
        outputs: Vec<AttachmentPoint>,
    },
    /// Clears buffers before drawing.
    ClearBuffers(ClearBuffersNode),
    /// Restricts drawing to a sub-rectangle of its parent's viewport.
    Viewport {
        /// Normalized rectangle relative to the parent viewport.
        rect: Rect,
        /// Output gamma.
        gamma: f32,
    },
    /// Orders render commands.
    SortPolicy {
        /// Criteria, most significant first.
        sort_types: Vec<SortType>,
    },
    /// Applies render states.
    StateSet {
        /// The render states.
        states: Vec<NodeId>,
    },
    /// Suppresses drawing.
    NoDraw,
    /// Culls entities outside the camera frustum.
    FrustumCulling,
    /// Dispatches compute work instead of drawing.
    DispatchCompute {
        /// Work group counts.
        work_groups: [u32; 3],
    },
    /// Selects the output surface.
    RenderSurfaceSelector {
        /// The surface name, `None` for the default surface.
        surface: Option<String>,
        /// Surface size in logical pixels.
        size: (u32, u32),
        /// Physical pixels per logical pixel.
        device_pixel_ratio: f32,
    },
    /// Requests a read back of the rendered image.
    RenderCapture {
        /// The pending request, if any.
        request: Option<RenderCaptureRequest>,
    },
    /// Requests buffer downloads after rendering.
    BufferCapture,
    /// Copies between render targets.
    BlitFramebuffer(BlitFramebufferNode),
    /// Waits on an external fence before rendering.
    WaitFence {
        /// The native fence handle.
        handle: u64,
    },
    /// Inserts a fence after rendering.
    SetFence,
    /// Excludes the branch from picking.
    NoPicking,
    /// Enables or disables a whole subtree.
    SubtreeEnabler,
    /// Inserts a memory barrier before rendering.
    MemoryBarrier {
        /// The barrier categories.
        barriers: MemoryBarrierFlags,
    },
    /// A node type this layer does not understand.
    Other {
        /// The type name reported by the scene.
        type_name: String,
    },
}

impl NodeKind {
    /// A short name for logging.
    pub fn type_name(&self) -> &str {
        match self {
            NodeKind::CameraSelector { .. } => "CameraSelector",
            NodeKind::LayerFilter { .. } => "LayerFilter",
            NodeKind::ProximityFilter { .. } => "ProximityFilter",
            NodeKind::RenderPassFilter { .. } => "RenderPassFilter",
            NodeKind::TechniqueFilter { .. } => "TechniqueFilter",
            NodeKind::RenderTargetSelector { .. } => "RenderTargetSelector",
            NodeKind::ClearBuffers(_) => "ClearBuffers",
            NodeKind::Viewport { .. } => "Viewport",
            NodeKind::SortPolicy { .. } => "SortPolicy",
            NodeKind::StateSet { .. } => "StateSet",
            NodeKind::NoDraw => "NoDraw",
            NodeKind::FrustumCulling => "FrustumCulling",
            NodeKind::DispatchCompute { .. } => "DispatchCompute",
            NodeKind::RenderSurfaceSelector { .. } => "RenderSurfaceSelector",
            NodeKind::RenderCapture { .. } => "RenderCapture",
            NodeKind::BufferCapture => "BufferCapture",
            NodeKind::BlitFramebuffer(_) => "BlitFramebuffer",
            NodeKind::WaitFence { .. } => "WaitFence",
            NodeKind::SetFence => "SetFence",
            NodeKind::NoPicking => "NoPicking",
            NodeKind::SubtreeEnabler => "SubtreeEnabler",
            NodeKind::MemoryBarrier { .. } => "MemoryBarrier",
            NodeKind::Other { type_name } => type_name,
        }
    }
}

/// A handle into a [`FrameGraph`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(usize);

/// One node of the frame graph.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameGraphNode {
    /// The node's identifier.
    pub id: NodeId,
    /// The parent, `None` for the root.
    pub parent: Option<NodeHandle>,
    /// Disabled nodes contribute nothing to a render view.
    pub enabled: bool,
    /// The node's payload.
    pub kind: NodeKind,
}

/// A frame graph stored as an arena. Parents are always inserted before
/// their children, so every parent handle is smaller than its child's.
#[derive(Debug, Clone, Default)]
pub struct FrameGraph {
    nodes: Vec<FrameGraphNode>,
    by_id: HashMap<NodeId, NodeHandle>,
    has_children: Vec<bool>,
}

impl FrameGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, parent: Option<NodeHandle>, id: NodeId, kind: NodeKind) -> NodeHandle {
        let handle = NodeHandle(self.nodes.len());
        if let Some(NodeHandle(p)) = parent {
            self.has_children[p] = true;
        }
        self.nodes.push(FrameGraphNode {
            id,
            parent,
            enabled: true,
            kind,
        });
        self.has_children.push(false);
        self.by_id.insert(id, handle);
        handle
    }

    /// Adds a parentless node.
    pub fn add_root(&mut self, kind: NodeKind) -> NodeHandle {
        self.push(None, NodeId::new(), kind)
    }

    /// Adds a node under `parent`. Returns `None` if `parent` is not in this graph.
    pub fn add_child(&mut self, parent: NodeHandle, kind: NodeKind) -> Option<NodeHandle> {
        self.add_child_with_id(parent, NodeId::new(), kind)
    }

    /// Adds a node with a caller-chosen identifier under `parent`.
    pub fn add_child_with_id(
        &mut self,
        parent: NodeHandle,
        id: NodeId,
        kind: NodeKind,
    ) -> Option<NodeHandle> {
        (parent.0 < self.nodes.len()).then(|| self.push(Some(parent), id, kind))
    }

    /// Adds a chain of nodes, root first, and returns the handle of the last one.
    pub fn add_chain(&mut self, kinds: impl IntoIterator<Item = NodeKind>) -> Option<NodeHandle> {
        let mut last: Option<NodeHandle> = None;
        for kind in kinds {
            last = Some(match last {
                None => self.add_root(kind),
                Some(parent) => self.push(Some(parent), NodeId::new(), kind),
            });
        }
        last
    }

    /// Returns the node behind a handle.
    pub fn node(&self, handle: NodeHandle) -> Option<&FrameGraphNode> {
        self.nodes.get(handle.0)
    }

    /// Returns the node behind a handle, mutably.
    pub fn node_mut(&mut self, handle: NodeHandle) -> Option<&mut FrameGraphNode> {
        self.nodes.get_mut(handle.0)
    }

    /// Finds a node by identifier.
    pub fn find(&self, id: NodeId) -> Option<NodeHandle> {
        self.by_id.get(&id).copied()
    }

    /// Enables or disables a node.
    pub fn set_enabled(&mut self, handle: NodeHandle, enabled: bool) {
        if let Some(node) = self.nodes.get_mut(handle.0) {
            node.enabled = enabled;
        }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` for an empty graph.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates from `leaf` up to its root, `leaf` first.
    pub fn path_to_root(&self, leaf: NodeHandle) -> PathToRoot<'_> {
        PathToRoot {
            graph: self,
            next: (leaf.0 < self.nodes.len()).then_some(leaf),
        }
    }

    /// The leaves each render view starts from, in insertion order.
    ///
    /// Leaves below a disabled [`NodeKind::SubtreeEnabler`] are left out.
    pub fn render_leaves(&self) -> Vec<NodeHandle> {
        (0..self.nodes.len())
            .map(NodeHandle)
            .filter(|h| !self.has_children[h.0])
            .filter(|h| {
                self.path_to_root(*h).all(|(_, node)| {
                    node.enabled || !matches!(node.kind, NodeKind::SubtreeEnabler)
                })
            })
            .collect()
    }
}

/// Iterator returned by [`FrameGraph::path_to_root`].
pub struct PathToRoot<'a> {
    graph: &'a FrameGraph,
    next: Option<NodeHandle>,
}

impl<'a> Iterator for PathToRoot<'a> {
    type Item = (NodeHandle, &'a FrameGraphNode);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.next?;
        let node = self.graph.nodes.get(handle.0)?;
        self.next = node.parent;
        Some((handle, node))
    }
}
