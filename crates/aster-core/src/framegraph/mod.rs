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

//! The frame-graph and material model consumed by render-view assembly.
//!
//! Nodes live in an arena ([`FrameGraph`]) and point at their parent by
//! index. Resources they reference are looked up by [`NodeId`] in
//! [`NodeManagers`].

pub mod id;
pub mod managers;
pub mod node;
pub mod resources;

pub use self::id::NodeId;
pub use self::managers::NodeManagers;
pub use self::node::*;
pub use self::resources::*;
