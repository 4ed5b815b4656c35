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

//! Render state sets holding at most one state per type.

use aster_core::framegraph::{NodeId, NodeManagers, RenderStateKind};
use aster_core::GraphicsHelper;

/// An ordered set of render states, unique by state type.
///
/// The first state added for a type wins. Callers add the states that should
/// take priority first: nearer frame-graph nodes before their ancestors, pass
/// states before view states.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderStateSet {
    states: Vec<RenderStateKind>,
}

impl RenderStateSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// The states, in insertion order.
    pub fn states(&self) -> &[RenderStateKind] {
        &self.states
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if the set holds no state.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns `true` if no state of the same type as `state` is present.
    pub fn can_add_state_of_type(&self, state: &RenderStateKind) -> bool {
        let state_type = state.state_type();
        self.states.iter().all(|s| s.state_type() != state_type)
    }

    /// Adds `state` unless its type is already present.
    ///
    /// # Returns
    ///
    /// `true` if the state was added.
    pub fn add_state(&mut self, state: RenderStateKind) -> bool {
        if !self.can_add_state_of_type(&state) {
            return false;
        }
        self.states.push(state);
        true
    }

    /// Adds the render states behind `ids`, skipping types already present.
    ///
    /// Ids that do not resolve to a registered render state are skipped.
    pub fn add_states_from_ids(&mut self, ids: &[NodeId], managers: &NodeManagers) {
        for id in ids {
            match managers.render_state(*id) {
                Some(state) => {
                    self.add_state(state.kind.clone());
                }
                None => log::debug!("RenderStateSet: render state {id} is not registered"),
            }
        }
    }

    /// Fills in the state types of `other` this set does not have yet.
    pub fn merge(&mut self, other: &RenderStateSet) {
        for state in &other.states {
            self.add_state(state.clone());
        }
    }

    /// Issues every state through `helper`.
    ///
    /// # Arguments
    ///
    /// * `helper`: The helper bound to the current context.
    /// * `draw_buffer_count`: Draw buffers in use. Blend factors without a
    ///   buffer index are applied to each of them, or to buffer 0 when none.
    pub fn apply<H: GraphicsHelper + ?Sized>(&self, helper: &mut H, draw_buffer_count: u32) {
        for state in &self.states {
            match *state {
                RenderStateKind::AlphaCoverage => helper.set_alpha_coverage_enabled(true),
                RenderStateKind::AlphaTest { func, reference } => {
                    helper.alpha_test(func, reference)
                }
                RenderStateKind::BlendEquation { mode } => helper.blend_equation(mode),
                RenderStateKind::BlendEquationArguments {
                    buffer,
                    src_rgb,
                    dst_rgb,
                    src_alpha,
                    dst_alpha,
                } => {
                    let buffers = match buffer {
                        Some(index) => index..index + 1,
                        None => 0..draw_buffer_count.max(1),
                    };
                    for index in buffers {
                        helper.blend_func_separate_i(index, src_rgb, dst_rgb, src_alpha, dst_alpha);
                    }
                }
                RenderStateKind::ClipPlane {
                    index,
                    normal,
                    distance,
                } => {
                    helper.enable_clip_plane(index);
                    helper.set_clip_plane(index, normal, distance);
                }
                RenderStateKind::DepthRange { near, far } => helper.depth_range(near, far),
                RenderStateKind::DepthTest { func } => helper.depth_test(func),
                RenderStateKind::NoDepthMask => helper.depth_mask(false),
                RenderStateKind::FrontFace { mode } => helper.front_face(mode),
                RenderStateKind::MultiSampleAntiAliasing => helper.set_msaa_enabled(true),
                RenderStateKind::PointSize {
                    programmable,
                    value,
                } => helper.point_size(programmable, value),
                RenderStateKind::PrimitiveRestart { restart_index } => {
                    helper.enable_primitive_restart(restart_index)
                }
                RenderStateKind::RasterMode { face, mode } => helper.raster_mode(face, mode),
                RenderStateKind::SeamlessCubemap => helper.set_seamless_cubemap(true),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aster_core::framegraph::RenderState;

    #[test]
    fn first_state_of_a_type_wins() {
        let mut set = RenderStateSet::new();
        assert!(set.add_state(RenderStateKind::DepthTest { func: 0x0201 }));
        assert!(!set.add_state(RenderStateKind::DepthTest { func: 0x0207 }));
        assert!(set.add_state(RenderStateKind::NoDepthMask));

        assert_eq!(
            set.states(),
            [
                RenderStateKind::DepthTest { func: 0x0201 },
                RenderStateKind::NoDepthMask
            ]
        );
    }

    #[test]
    fn merge_only_fills_missing_types() {
        let mut pass = RenderStateSet::new();
        pass.add_state(RenderStateKind::FrontFace { mode: 0x0900 });

        let mut view = RenderStateSet::new();
        view.add_state(RenderStateKind::FrontFace { mode: 0x0901 });
        view.add_state(RenderStateKind::SeamlessCubemap);

        pass.merge(&view);
        assert_eq!(pass.len(), 2);
        assert_eq!(pass.states()[0], RenderStateKind::FrontFace { mode: 0x0900 });
    }

    #[test]
    fn dangling_state_ids_are_skipped() {
        let mut managers = NodeManagers::new();
        let id = managers.insert_render_state(RenderState {
            id: NodeId::from_name("msaa"),
            kind: RenderStateKind::MultiSampleAntiAliasing,
        });

        let mut set = RenderStateSet::new();
        set.add_states_from_ids(&[NodeId::new(), id], &managers);

        assert_eq!(set.states(), [RenderStateKind::MultiSampleAntiAliasing]);
    }
}
