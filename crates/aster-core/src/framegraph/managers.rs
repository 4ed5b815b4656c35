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

//! Identifier to resource lookup used while assembling render views.

use super::id::NodeId;
use super::resources::{
    Effect, Entity, FilterKey, Material, Parameter, RenderPass, RenderState, RenderTarget,
    RenderTargetOutput, Technique,
};
use std::collections::HashMap;

/// Owns every resource a frame graph can reference.
///
/// Every lookup may miss; callers treat a miss as "skip this contribution".
#[derive(Debug, Clone, Default)]
pub struct NodeManagers {
    entities: HashMap<NodeId, Entity>,
    render_targets: HashMap<NodeId, RenderTarget>,
    render_target_outputs: HashMap<NodeId, RenderTargetOutput>,
    techniques: HashMap<NodeId, Technique>,
    render_passes: HashMap<NodeId, RenderPass>,
    effects: HashMap<NodeId, Effect>,
    materials: HashMap<NodeId, Material>,
    parameters: HashMap<NodeId, Parameter>,
    filter_keys: HashMap<NodeId, FilterKey>,
    render_states: HashMap<NodeId, RenderState>,
}

macro_rules! manager {
    ($field:ident, $ty:ty, $insert:ident, $get:ident) => {
        #[doc = concat!("Registers a [`", stringify!($ty), "`] under its own id.")]
        pub fn $insert(&mut self, value: $ty) -> NodeId {
            let id = value.id;
            self.$field.insert(id, value);
            id
        }

        #[doc = concat!("Looks up a [`", stringify!($ty), "`].")]
        pub fn $get(&self, id: NodeId) -> Option<&$ty> {
            self.$field.get(&id)
        }
    };
}

impl NodeManagers {
    /// Creates empty managers.
    pub fn new() -> Self {
        Self::default()
    }

    manager!(entities, Entity, insert_entity, entity);
    manager!(render_targets, RenderTarget, insert_render_target, render_target);
    manager!(
        render_target_outputs,
        RenderTargetOutput,
        insert_render_target_output,
        render_target_output
    );
    manager!(techniques, Technique, insert_technique, technique);
    manager!(render_passes, RenderPass, insert_render_pass, render_pass);
    manager!(effects, Effect, insert_effect, effect);
    manager!(materials, Material, insert_material, material);
    manager!(parameters, Parameter, insert_parameter, parameter);
    manager!(filter_keys, FilterKey, insert_filter_key, filter_key);
    manager!(render_states, RenderState, insert_render_state, render_state);

    /// Resolves filter key ids, skipping dangling ones.
    pub fn resolve_filter_keys<'a>(
        &'a self,
        ids: &'a [NodeId],
    ) -> impl Iterator<Item = &'a FilterKey> + 'a {
        ids.iter().filter_map(move |id| self.filter_key(*id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_miss_gracefully() {
        let mut managers = NodeManagers::new();
        let key = FilterKey {
            id: NodeId::from_name("key"),
            name: "pass".to_string(),
            value: serde_json::json!("opaque"),
        };
        let id = managers.insert_filter_key(key);
        assert!(managers.filter_key(id).is_some());
        assert!(managers.technique(id).is_none());

        let ids = [id, NodeId::new()];
        assert_eq!(managers.resolve_filter_keys(&ids).count(), 1);
    }
}
