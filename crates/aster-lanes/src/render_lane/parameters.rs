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

//! Parameter gathering for a draw.
//!
//! Parameters are collected from several providers into one list sorted by
//! name. A name is kept from the first provider that supplies it, so callers
//! add providers from highest to lowest priority.

use aster_core::framegraph::{Effect, Material, NodeId, NodeManagers, Parameter, Technique};

/// Parameters sorted by name, unique by name.
pub type ParameterInfoList<'a> = Vec<&'a Parameter>;

/// Finds the parameter called `name` in a sorted list.
pub fn find_param_info<'a>(params: &[&'a Parameter], name: &str) -> Option<&'a Parameter> {
    params
        .binary_search_by(|p| p.name.as_str().cmp(name))
        .ok()
        .map(|index| params[index])
}

/// Inserts the parameters behind `ids` whose names are not in `params` yet.
///
/// Unregistered ids are skipped.
pub fn add_parameters_for_ids<'a>(
    params: &mut ParameterInfoList<'a>,
    managers: &'a NodeManagers,
    ids: &[NodeId],
) {
    for id in ids {
        let Some(parameter) = managers.parameter(*id) else {
            log::debug!("add_parameters_for_ids: parameter {id} is not registered");
            continue;
        };
        if let Err(index) = params.binary_search_by(|p| p.name.cmp(&parameter.name)) {
            params.insert(index, parameter);
        }
    }
}

/// Gathers parameters with material over effect over technique priority.
///
/// Lets a material override the defaults of its effect, and an effect
/// override those of a technique.
pub fn parameters_from_material_effect_technique<'a>(
    params: &mut ParameterInfoList<'a>,
    managers: &'a NodeManagers,
    material: Option<&Material>,
    effect: Option<&Effect>,
    technique: Option<&Technique>,
) {
    if let Some(material) = material {
        add_parameters_for_ids(params, managers, &material.parameters);
    }
    if let Some(effect) = effect {
        add_parameters_for_ids(params, managers, &effect.parameters);
    }
    if let Some(technique) = technique {
        add_parameters_for_ids(params, managers, &technique.parameters);
    }
}
