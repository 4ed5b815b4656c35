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

//! Technique and render pass selection.

use aster_core::framegraph::{
    Effect, GraphicsApi, GraphicsApiFilter, GraphicsApiProfile, NodeId, NodeManagers, RenderPass,
    Technique,
};
use aster_core::renderer::api::{ApiFamily, ContextVersion};

use super::render_view::FilterSelection;

/// Describes what a context provides, for matching against technique requirements.
///
/// Desktop contexts from 3.2 on are reported as core profile. Extensions and
/// vendor are left empty for the caller to fill in.
pub fn context_api_filter(version: ContextVersion) -> GraphicsApiFilter {
    let api = match version.family {
        ApiFamily::Desktop => GraphicsApi::OpenGL,
        ApiFamily::Es => GraphicsApi::OpenGLES,
        ApiFamily::Rhi => GraphicsApi::Rhi,
    };
    let mut filter = GraphicsApiFilter::new(api, version.major, version.minor);
    if api == GraphicsApi::OpenGL && version.at_least(3, 2) {
        filter.profile = GraphicsApiProfile::Core;
    }
    filter
}

/// Checks that every key in `required` equals one of the keys in `carried`.
///
/// Ids that do not resolve are ignored on both sides.
pub fn matches_filter_keys(
    managers: &NodeManagers,
    carried: &[NodeId],
    required: &[NodeId],
) -> bool {
    let carried: Vec<_> = managers.resolve_filter_keys(carried).collect();
    managers
        .resolve_filter_keys(required)
        .all(|wanted| carried.iter().any(|key| key.equals(wanted)))
}

/// Picks the technique of `effect` used to draw on the current context.
///
/// Candidates must be enabled, run on `context` and carry every key of
/// `filter`. Among candidates the highest required API version wins, major
/// first; on a tie the one declared first is kept.
///
/// # Arguments
///
/// * `managers`: Resource lookup.
/// * `filter`: The view's technique filter, if any.
/// * `effect`: The effect whose techniques are considered.
/// * `context`: What the current context provides.
///
/// # Returns
///
/// The technique, or `None` when nothing matches. The draw is then skipped.
pub fn find_technique_for_effect<'a>(
    managers: &'a NodeManagers,
    filter: Option<&FilterSelection>,
    effect: &Effect,
    context: &GraphicsApiFilter,
) -> Option<&'a Technique> {
    let mut best: Option<&Technique> = None;
    for id in &effect.techniques {
        let Some(technique) = managers.technique(*id) else {
            log::debug!("find_technique_for_effect: technique {id} is not registered");
            continue;
        };
        if !technique.enabled || !context.satisfies(&technique.api_filter) {
            continue;
        }
        if let Some(filter) = filter.filter(|f| !f.is_vacuous()) {
            if !matches_filter_keys(managers, &technique.filter_keys, &filter.matches) {
                continue;
            }
        }
        let version = |t: &Technique| (t.api_filter.major, t.api_filter.minor);
        let higher = match best {
            None => true,
            Some(current) => version(technique) > version(current),
        };
        if higher {
            best = Some(technique);
        }
    }
    best
}

/// Lists the passes of `technique` selected by `filter`, in declaration order.
///
/// Disabled and unregistered passes are left out. A missing or empty filter
/// selects every remaining pass.
pub fn find_render_passes_for_technique<'a>(
    managers: &'a NodeManagers,
    filter: Option<&FilterSelection>,
    technique: &Technique,
) -> Vec<&'a RenderPass> {
    technique
        .render_passes
        .iter()
        .filter_map(|id| managers.render_pass(*id))
        .filter(|pass| pass.enabled)
        .filter(|pass| match filter {
            Some(filter) if !filter.is_vacuous() => {
                matches_filter_keys(managers, &pass.filter_keys, &filter.matches)
            }
            _ => true,
        })
        .collect()
}
