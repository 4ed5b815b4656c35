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

//! Rendering lane: render-view assembly and draw resolution.
//!
//! A frame graph is walked once per leaf. Each walk produces a [`RenderView`]
//! holding everything the branch configures. Draws are then resolved against
//! that view: material to effect, effect to technique, technique to passes.

mod assembly_lane;
mod parameters;
mod render_view;
mod state;
mod technique;

pub use assembly_lane::*;
pub use parameters::*;
pub use render_view::*;
pub use state::*;
pub use technique::*;
