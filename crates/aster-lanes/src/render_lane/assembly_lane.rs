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

//! The render-view assembly lane.

use aster_core::framegraph::{
    Effect, FrameGraph, GraphicsApiFilter, Material, NodeId, NodeManagers, Parameter, RenderPass,
    Technique,
};
use aster_core::renderer::api::ContextVersion;
use thiserror::Error;

use super::parameters::{add_parameters_for_ids, parameters_from_material_effect_technique};
use super::render_view::RenderView;
use super::state::RenderStateSet;
use super::technique::{
    context_api_filter, find_render_passes_for_technique, find_technique_for_effect,
};

/// Why a draw was left out of a view. None of these are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawSkip {
    /// The material id is not registered.
    #[error("material {0} is not registered")]
    MissingMaterial(NodeId),
    /// The material does not reference an effect.
    #[error("material {0} has no effect")]
    NoEffect(NodeId),
    /// The material's effect is not registered.
    #[error("effect {0} is not registered")]
    MissingEffect(NodeId),
    /// No technique of the effect runs on the context and passes the technique filter.
    #[error("no technique of effect {0} matches the context and technique filter")]
    NoTechnique(NodeId),
    /// No pass of the technique passes the render pass filter.
    #[error("no render pass of technique {0} matches the render pass filter")]
    NoRenderPass(NodeId),
}

/// One pass of a resolved draw, with what it needs bound.
#[derive(Debug, Clone)]
pub struct PassDraw<'a> {
    /// The pass.
    pub pass: &'a RenderPass,
    /// Parameters sorted by name.
    pub parameters: Vec<&'a Parameter>,
    /// Pass states first, then the view's states for the remaining types.
    pub render_states: RenderStateSet,
}

/// The technique and passes a material draws with in one view.
#[derive(Debug, Clone)]
pub struct ResolvedDraw<'a> {
    /// The material.
    pub material: &'a Material,
    /// The material's effect.
    pub effect: &'a Effect,
    /// The selected technique.
    pub technique: &'a Technique,
    /// Selected passes, in declaration order.
    pub passes: Vec<PassDraw<'a>>,
}

/// A lane that assembles the render views of a frame graph and resolves the
/// draws issued in them.
///
/// The lane holds the description of the context it renders for, so
/// technique selection only considers techniques that context can run.
#[derive(Debug, Clone)]
pub struct RenderViewAssemblyLane {
    context: GraphicsApiFilter,
}

impl RenderViewAssemblyLane {
    /// Creates a lane for a context described by `context`.
    pub fn new(context: GraphicsApiFilter) -> Self {
        Self { context }
    }

    /// Creates a lane for a context reporting `version`.
    pub fn for_context(version: ContextVersion) -> Self {
        Self::new(context_api_filter(version))
    }

    /// What the target context provides.
    pub fn context(&self) -> &GraphicsApiFilter {
        &self.context
    }

    /// Builds one view per render leaf of `graph`, in leaf order.
    ///
    /// # Arguments
    ///
    /// * `graph`: The frame graph.
    /// * `managers`: Resource lookup for the ids nodes reference.
    pub fn run(&self, graph: &FrameGraph, managers: &NodeManagers) -> Vec<RenderView> {
        let views: Vec<RenderView> = graph
            .render_leaves()
            .into_iter()
            .map(|leaf| RenderView::from_leaf(graph, leaf, managers))
            .collect();
        log::trace!("RenderViewAssemblyLane: assembled {} render views", views.len());
        views
    }

    /// Resolves what drawing `material` in `view` uses.
    ///
    /// Parameter priority, highest first: render pass filter, technique
    /// filter, material, effect, technique, render pass.
    ///
    /// # Returns
    ///
    /// The resolved draw, or the reason it has to be skipped.
    pub fn resolve_draw<'a>(
        &self,
        view: &RenderView,
        managers: &'a NodeManagers,
        material: NodeId,
    ) -> Result<ResolvedDraw<'a>, DrawSkip> {
        let material = managers
            .material(material)
            .ok_or(DrawSkip::MissingMaterial(material))?;
        let effect_id = material.effect.ok_or(DrawSkip::NoEffect(material.id))?;
        let effect = managers
            .effect(effect_id)
            .ok_or(DrawSkip::MissingEffect(effect_id))?;
        let technique = find_technique_for_effect(
            managers,
            view.technique_filter.as_ref(),
            effect,
            &self.context,
        )
        .ok_or(DrawSkip::NoTechnique(effect.id))?;

        let passes = find_render_passes_for_technique(
            managers,
            view.render_pass_filter.as_ref(),
            technique,
        );
        if passes.is_empty() {
            return Err(DrawSkip::NoRenderPass(technique.id));
        }

        let mut shared = Vec::new();
        if let Some(filter) = &view.render_pass_filter {
            add_parameters_for_ids(&mut shared, managers, &filter.parameters);
        }
        if let Some(filter) = &view.technique_filter {
            add_parameters_for_ids(&mut shared, managers, &filter.parameters);
        }
        parameters_from_material_effect_technique(
            &mut shared,
            managers,
            Some(material),
            Some(effect),
            Some(technique),
        );

        let passes = passes
            .into_iter()
            .map(|pass| {
                let mut parameters = shared.clone();
                add_parameters_for_ids(&mut parameters, managers, &pass.parameters);

                let mut render_states = RenderStateSet::new();
                render_states.add_states_from_ids(&pass.render_states, managers);
                if let Some(view_states) = &view.state_set {
                    render_states.merge(view_states);
                }

                PassDraw {
                    pass,
                    parameters,
                    render_states,
                }
            })
            .collect();

        Ok(ResolvedDraw {
            material,
            effect,
            technique,
            passes,
        })
    }
}
