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

//! Data types shared by every helper variant and its consumers.

pub mod attachment;
pub mod core;
pub mod feature;
pub mod gl;
pub mod layout;
pub mod shader;
pub mod state;
pub mod uniform_value;
pub mod util;

pub use self::attachment::*;
pub use self::core::*;
pub use self::feature::*;
pub use self::layout::{classify, uniform_byte_size, GlTypeClass, ScalarKind};
pub use self::shader::*;
pub use self::state::*;
pub use self::uniform_value::*;
pub use self::util::*;
