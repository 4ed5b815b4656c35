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

//! Defines the [`RenderView`] and the leaf-to-root fold that populates it.
//!
//! Each enabled node on the path from a frame-graph leaf to its root adds its
//! contribution to one view. Single-valued settings keep the value found
//! nearest the leaf. List-valued settings accumulate, nearest first. Flags
//! stay set once any node sets them. Viewports compose.

use aster_core::framegraph::{
    BlitFramebufferNode, CameraLens, ClearBufferTypes, ClearBuffersNode, FrameGraph,
    FrameGraphNode, NodeHandle, NodeId, NodeKind, NodeManagers, Rect, RenderCaptureRequest,
    RenderTarget, SortType,
};
use aster_core::renderer::api::{Attachment, AttachmentPoint, MemoryBarrierFlags};

use super::state::RenderStateSet;

/// Gamma used when no viewport node sets one.
pub const DEFAULT_GAMMA: f32 = 2.2;

/// Composes a viewport with the viewport of an ancestor node.
///
/// `child` is expressed relative to `parent`. An empty child rectangle
/// yields `parent` unchanged.
///
/// # Arguments
///
/// * `child`: The viewport accumulated so far, from nodes nearer the leaf.
/// * `parent`: The ancestor viewport node's rectangle.
///
/// # Returns
///
/// `child` mapped into `parent`'s sub-rectangle.
pub fn compute_viewport(child: Rect, parent: Rect) -> Rect {
    if child.width <= 0.0 || child.height <= 0.0 {
        return parent;
    }
    Rect::new(
        parent.x + parent.width * child.x,
        parent.y + parent.height * child.y,
        parent.width * child.width,
        parent.height * child.height,
    )
}

/// Filter keys and parameters carried by a technique or render pass filter node.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSelection {
    /// The filter node.
    pub node: NodeId,
    /// Filter keys a candidate must carry.
    pub matches: Vec<NodeId>,
    /// Parameters injected by the filter.
    pub parameters: Vec<NodeId>,
}

impl FilterSelection {
    /// Returns `true` if the filter requires no key.
    pub fn is_vacuous(&self) -> bool {
        self.matches.is_empty()
    }
}

/// The attachments of the selected render target and the draw buffers used.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttachmentPack {
    attachments: Vec<Attachment>,
    draw_buffers: Vec<i32>,
}

impl AttachmentPack {
    /// Builds the pack for `target`.
    ///
    /// Outputs that are not registered are skipped. When `outputs` is empty
    /// every color attachment of the target becomes a draw buffer; otherwise
    /// the color points listed in `outputs` do, in that order.
    pub fn new(
        target: &RenderTarget,
        managers: &NodeManagers,
        outputs: &[AttachmentPoint],
    ) -> Self {
        let attachments: Vec<Attachment> = target
            .outputs
            .iter()
            .filter_map(|id| managers.render_target_output(*id))
            .map(|output| output.attachment.clone())
            .collect();

        let draw_buffers = if outputs.is_empty() {
            attachments
                .iter()
                .filter_map(|a| a.point.color_index())
                .map(i32::from)
                .collect()
        } else {
            outputs
                .iter()
                .filter_map(|point| point.color_index())
                .map(i32::from)
                .collect()
        };

        Self {
            attachments,
            draw_buffers,
        }
    }

    /// The target's attachments.
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Color attachment indices to draw into.
    pub fn draw_buffers(&self) -> &[i32] {
        &self.draw_buffers
    }

    /// Position of a color attachment in [`Self::draw_buffers`].
    pub fn draw_buffer_index(&self, point: AttachmentPoint) -> Option<usize> {
        let color = i32::from(point.color_index()?);
        self.draw_buffers.iter().position(|b| *b == color)
    }
}

/// A color clear restricted to one render target output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearColorInfo {
    /// The color.
    pub clear_color: [f32; 4],
    /// The attachment cleared.
    pub attachment_point: AttachmentPoint,
    /// Index into the draw buffers, once the attachment pack is known.
    pub draw_buffer_index: Option<usize>,
}

/// The output surface of a view.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceInfo {
    /// The surface, `None` for the default one.
    pub name: Option<String>,
    /// Size in physical pixels.
    pub size: (u32, u32),
    /// Physical pixels per logical pixel.
    pub device_pixel_ratio: f32,
}

/// A pending capture and the node that requested it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderCaptureInfo {
    /// The render capture node.
    pub node: NodeId,
    /// The request.
    pub request: RenderCaptureRequest,
}

/// The render configuration of one frame-graph branch.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderView {
    /// The leaf the view was built from.
    pub leaf: Option<NodeId>,
    /// The camera entity.
    pub camera: Option<NodeId>,
    /// The camera's lens, once a camera with a lens was found.
    pub camera_lens: Option<CameraLens>,
    /// The render target.
    pub render_target: Option<NodeId>,
    /// Attachments of the render target.
    pub attachment_pack: AttachmentPack,
    /// The output surface.
    pub surface: Option<SurfaceInfo>,
    /// Selects render passes.
    pub render_pass_filter: Option<FilterSelection>,
    /// Selects techniques.
    pub technique_filter: Option<FilterSelection>,
    /// Layer filter nodes, nearest first.
    pub layer_filters: Vec<NodeId>,
    /// Proximity filter nodes, nearest first.
    pub proximity_filters: Vec<NodeId>,
    /// Sort criteria, nearest first.
    pub sort_types: Vec<SortType>,
    /// Every clear-buffers node on the path, nearest first.
    pub clear_buffers: Vec<ClearBuffersNode>,
    /// Union of the buffers cleared by all nodes.
    pub clear_buffer_types: ClearBufferTypes,
    /// The depth clear value.
    pub clear_depth: f32,
    /// The stencil clear value.
    pub clear_stencil: i32,
    /// Clear color for every color buffer.
    pub global_clear_color: Option<[f32; 4]>,
    /// Clear colors for single outputs.
    pub specific_clear_colors: Vec<ClearColorInfo>,
    /// Normalized viewport.
    pub viewport: Rect,
    /// Output gamma, `None` until a viewport node sets one.
    pub gamma: Option<f32>,
    /// Render states applied to every draw.
    pub state_set: Option<RenderStateSet>,
    /// Suppresses drawing.
    pub no_draw: bool,
    /// Culls against the camera frustum.
    pub frustum_culling: bool,
    /// Dispatches compute work instead of drawing.
    pub compute: bool,
    /// Compute work group counts.
    pub compute_work_groups: [u32; 3],
    /// A pending capture.
    pub render_capture: Option<RenderCaptureInfo>,
    /// Downloads buffers after rendering.
    pub download_buffers: bool,
    /// A framebuffer blit.
    pub blit_framebuffer: Option<BlitFramebufferNode>,
    /// Barriers inserted before rendering.
    pub memory_barrier: MemoryBarrierFlags,
    /// Fences waited on before rendering.
    pub wait_fences: Vec<u64>,
    /// Set-fence nodes that insert a fence after rendering.
    pub insert_fence_ids: Vec<NodeId>,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            leaf: None,
            camera: None,
            camera_lens: None,
            render_target: None,
            attachment_pack: AttachmentPack::default(),
            surface: None,
            render_pass_filter: None,
            technique_filter: None,
            layer_filters: Vec::new(),
            proximity_filters: Vec::new(),
            sort_types: Vec::new(),
            clear_buffers: Vec::new(),
            clear_buffer_types: ClearBufferTypes::NONE,
            clear_depth: 1.0,
            clear_stencil: 0,
            global_clear_color: None,
            specific_clear_colors: Vec::new(),
            viewport: Rect::UNIT,
            gamma: None,
            state_set: None,
            no_draw: false,
            frustum_culling: false,
            compute: false,
            compute_work_groups: [1, 1, 1],
            render_capture: None,
            download_buffers: false,
            blit_framebuffer: None,
            memory_barrier: MemoryBarrierFlags::NONE,
            wait_fences: Vec::new(),
            insert_fence_ids: Vec::new(),
        }
    }
}

impl RenderView {
    /// Creates an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the view of the branch ending at `leaf`.
    ///
    /// # Arguments
    ///
    /// * `graph`: The frame graph.
    /// * `leaf`: The branch's leaf. An unknown handle yields an empty view.
    /// * `managers`: Resource lookup for the ids nodes reference.
    pub fn from_leaf(graph: &FrameGraph, leaf: NodeHandle, managers: &NodeManagers) -> Self {
        let mut view = RenderView::new();
        for (_, node) in graph.path_to_root(leaf) {
            if view.leaf.is_none() {
                view.leaf = Some(node.id);
            }
            if node.enabled {
                view.fold_node(node, managers);
            }
        }
        view.resolve_clear_color_draw_buffers();
        view
    }

    /// Gamma to apply, [`DEFAULT_GAMMA`] unless a viewport node set one.
    pub fn gamma(&self) -> f32 {
        self.gamma.unwrap_or(DEFAULT_GAMMA)
    }

    /// Returns `true` if the view should issue draw commands.
    pub fn draws(&self) -> bool {
        !self.no_draw && !self.compute
    }

    fn fold_node(&mut self, node: &FrameGraphNode, managers: &NodeManagers) {
        match &node.kind {
            NodeKind::CameraSelector { camera } => {
                if self.camera_lens.is_none() {
                    self.select_camera(*camera, managers);
                }
            }
            NodeKind::LayerFilter { .. } => self.layer_filters.push(node.id),
            NodeKind::ProximityFilter { .. } => self.proximity_filters.push(node.id),
            NodeKind::RenderPassFilter {
                matches,
                parameters,
            } => {
                if self.render_pass_filter.is_none() {
                    self.render_pass_filter = Some(FilterSelection {
                        node: node.id,
                        matches: matches.clone(),
                        parameters: parameters.clone(),
                    });
                }
            }
            NodeKind::TechniqueFilter {
                matches,
                parameters,
            } => {
                if self.technique_filter.is_none() {
                    self.technique_filter = Some(FilterSelection {
                        node: node.id,
                        matches: matches.clone(),
                        parameters: parameters.clone(),
                    });
                }
            }
            NodeKind::RenderTargetSelector { target, outputs } => {
                if self.render_target.is_none() {
                    if let Some(target) = target {
                        self.render_target = Some(*target);
                        match managers.render_target(*target) {
                            Some(render_target) => {
                                self.attachment_pack =
                                    AttachmentPack::new(render_target, managers, outputs);
                            }
                            None => {
                                log::debug!("RenderView: render target {target} is not registered")
                            }
                        }
                    }
                }
            }
            NodeKind::ClearBuffers(clear) => self.add_clear_buffers(clear, managers),
            NodeKind::Viewport { rect, gamma } => {
                self.viewport = compute_viewport(self.viewport, *rect);
                self.gamma.get_or_insert(*gamma);
            }
            NodeKind::SortPolicy { sort_types } => self.sort_types.extend_from_slice(sort_types),
            NodeKind::StateSet { states } => {
                if !states.is_empty() {
                    self.state_set
                        .get_or_insert_with(RenderStateSet::new)
                        .add_states_from_ids(states, managers);
                }
            }
            NodeKind::NoDraw => self.no_draw = true,
            NodeKind::FrustumCulling => self.frustum_culling = true,
            NodeKind::DispatchCompute { work_groups } => {
                if !self.compute {
                    self.compute = true;
                    self.compute_work_groups = *work_groups;
                }
            }
            NodeKind::RenderSurfaceSelector {
                surface,
                size,
                device_pixel_ratio,
            } => {
                if self.surface.is_none() {
                    let scale = |v: u32| (v as f32 * device_pixel_ratio).round() as u32;
                    self.surface = Some(SurfaceInfo {
                        name: surface.clone(),
                        size: (scale(size.0), scale(size.1)),
                        device_pixel_ratio: *device_pixel_ratio,
                    });
                }
            }
            NodeKind::RenderCapture { request } => {
                if self.render_capture.is_none() {
                    if let Some(request) = request {
                        self.render_capture = Some(RenderCaptureInfo {
                            node: node.id,
                            request: request.clone(),
                        });
                    }
                }
            }
            NodeKind::BufferCapture => self.download_buffers = true,
            NodeKind::BlitFramebuffer(blit) => {
                if self.blit_framebuffer.is_none() {
                    self.blit_framebuffer = Some(blit.clone());
                }
            }
            NodeKind::WaitFence { handle } => self.wait_fences.push(*handle),
            NodeKind::SetFence => self.insert_fence_ids.push(node.id),
            NodeKind::MemoryBarrier { barriers } => {
                self.memory_barrier = self.memory_barrier | *barriers;
            }
            // Subtree enablers are honored when the leaves are collected.
            NodeKind::NoPicking | NodeKind::SubtreeEnabler => {}
            NodeKind::Other { type_name } => {
                log::warn!("RenderView: unhandled frame-graph node type '{type_name}', skipping");
            }
        }
    }

    fn select_camera(&mut self, camera: Option<NodeId>, managers: &NodeManagers) {
        let Some(camera) = camera else {
            return;
        };
        match managers.entity(camera) {
            Some(entity) => {
                self.camera = Some(camera);
                self.camera_lens = entity.lens.clone();
            }
            None => log::debug!("RenderView: camera entity {camera} is not registered"),
        }
    }

    /// Nearer nodes keep their depth, stencil and global color values; the
    /// cleared buffer set is the union of all nodes.
    fn add_clear_buffers(&mut self, clear: &ClearBuffersNode, managers: &NodeManagers) {
        self.clear_buffers.push(clear.clone());
        let types = clear.buffers;

        if types.contains(ClearBufferTypes::STENCIL)
            && !self.clear_buffer_types.contains(ClearBufferTypes::STENCIL)
        {
            self.clear_stencil = clear.clear_stencil;
            self.clear_buffer_types = self.clear_buffer_types | ClearBufferTypes::STENCIL;
        }
        if types.contains(ClearBufferTypes::DEPTH)
            && !self.clear_buffer_types.contains(ClearBufferTypes::DEPTH)
        {
            self.clear_depth = clear.clear_depth;
            self.clear_buffer_types = self.clear_buffer_types | ClearBufferTypes::DEPTH;
        }
        if !types.contains(ClearBufferTypes::COLOR) {
            return;
        }

        match clear.color_buffer {
            None => {
                if self.global_clear_color.is_none() {
                    self.global_clear_color = Some(clear.clear_color);
                    self.clear_buffer_types = self.clear_buffer_types | ClearBufferTypes::COLOR;
                }
            }
            Some(output_id) => match managers.render_target_output(output_id) {
                Some(output) => self.specific_clear_colors.push(ClearColorInfo {
                    clear_color: clear.clear_color,
                    attachment_point: output.attachment.point,
                    draw_buffer_index: None,
                }),
                None => log::debug!("RenderView: clear output {output_id} is not registered"),
            },
        }
    }

    fn resolve_clear_color_draw_buffers(&mut self) {
        for info in &mut self.specific_clear_colors {
            info.draw_buffer_index = self.attachment_pack.draw_buffer_index(info.attachment_point);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aster_core::framegraph::RenderTargetOutput;

    fn leaf_view(kinds: Vec<NodeKind>, managers: &NodeManagers) -> RenderView {
        let mut graph = FrameGraph::new();
        let leaf = graph.add_chain(kinds).unwrap();
        RenderView::from_leaf(&graph, leaf, managers)
    }

    #[test]
    fn empty_child_viewport_takes_the_parent() {
        let parent = Rect::new(0.25, 0.25, 0.5, 0.5);
        assert_eq!(compute_viewport(Rect::new(0.0, 0.0, 0.0, 1.0), parent), parent);
    }

    #[test]
    fn nearest_technique_filter_wins() {
        let near = NodeId::from_name("near-key");
        let far = NodeId::from_name("far-key");
        let view = leaf_view(
            vec![
                NodeKind::TechniqueFilter {
                    matches: vec![far],
                    parameters: vec![],
                },
                NodeKind::TechniqueFilter {
                    matches: vec![near],
                    parameters: vec![],
                },
            ],
            &NodeManagers::new(),
        );
        assert_eq!(view.technique_filter.unwrap().matches, vec![near]);
    }

    #[test]
    fn flags_stick_and_sort_types_accumulate() {
        let view = leaf_view(
            vec![
                NodeKind::SortPolicy {
                    sort_types: vec![SortType::Material],
                },
                NodeKind::FrustumCulling,
                NodeKind::SortPolicy {
                    sort_types: vec![SortType::BackToFront],
                },
                NodeKind::NoPicking,
            ],
            &NodeManagers::new(),
        );
        assert!(view.frustum_culling);
        assert!(!view.no_draw);
        assert_eq!(view.sort_types, vec![SortType::BackToFront, SortType::Material]);
    }

    #[test]
    fn disabled_nodes_contribute_nothing() {
        let mut graph = FrameGraph::new();
        let root = graph.add_root(NodeKind::NoDraw);
        let leaf = graph
            .add_child(root, NodeKind::DispatchCompute { work_groups: [4, 2, 1] })
            .unwrap();
        graph.set_enabled(root, false);

        let view = RenderView::from_leaf(&graph, leaf, &NodeManagers::new());
        assert!(!view.no_draw);
        assert!(view.compute);
        assert_eq!(view.compute_work_groups, [4, 2, 1]);
        assert!(!view.draws());
    }

    #[test]
    fn unknown_node_types_are_skipped() {
        let view = leaf_view(
            vec![
                NodeKind::FrustumCulling,
                NodeKind::Other {
                    type_name: "Lighting".to_string(),
                },
            ],
            &NodeManagers::new(),
        );
        assert!(view.frustum_culling);
    }

    #[test]
    fn specific_clear_colors_resolve_their_draw_buffer() {
        let mut managers = NodeManagers::new();
        let color0 = managers.insert_render_target_output(RenderTargetOutput {
            id: NodeId::from_name("albedo"),
            attachment: Attachment::new(AttachmentPoint::Color(0)),
            texture: None,
        });
        let color2 = managers.insert_render_target_output(RenderTargetOutput {
            id: NodeId::from_name("normals"),
            attachment: Attachment::new(AttachmentPoint::Color(2)),
            texture: None,
        });
        let target = managers.insert_render_target(RenderTarget {
            id: NodeId::from_name("gbuffer"),
            outputs: vec![color0, color2],
        });

        let view = leaf_view(
            vec![
                NodeKind::RenderTargetSelector {
                    target: Some(target),
                    outputs: vec![],
                },
                NodeKind::ClearBuffers(ClearBuffersNode {
                    buffers: ClearBufferTypes::COLOR,
                    clear_color: [0.0, 0.0, 1.0, 1.0],
                    color_buffer: Some(color2),
                    ..ClearBuffersNode::default()
                }),
            ],
            &managers,
        );

        assert_eq!(view.attachment_pack.draw_buffers(), [0, 2]);
        assert_eq!(view.specific_clear_colors.len(), 1);
        assert_eq!(view.specific_clear_colors[0].draw_buffer_index, Some(1));
        assert!(view.global_clear_color.is_none());
        assert!(!view.clear_buffer_types.contains(ClearBufferTypes::COLOR));
    }
}
