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

//! Engine-side uniform values handed to the packer and the upload entry points.

use serde::{Deserialize, Serialize};

/// A uniform value as a flat list of components.
///
/// Matrices are stored column-major. Arrays are the concatenation of their
/// elements. Reading a component past the end yields zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UniformValue {
    /// 32-bit floats.
    Float(Vec<f32>),
    /// 32-bit signed integers, also used for sampler units.
    Int(Vec<i32>),
    /// 32-bit unsigned integers.
    UInt(Vec<u32>),
    /// Booleans.
    Bool(Vec<bool>),
}

impl UniformValue {
    /// Number of stored components.
    pub fn len(&self) -> usize {
        match self {
            UniformValue::Float(v) => v.len(),
            UniformValue::Int(v) => v.len(),
            UniformValue::UInt(v) => v.len(),
            UniformValue::Bool(v) => v.len(),
        }
    }

    /// Returns `true` when no component is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Component `i` converted to `f32`.
    pub fn float_at(&self, i: usize) -> f32 {
        match self {
            UniformValue::Float(v) => v.get(i).copied().unwrap_or(0.0),
            UniformValue::Int(v) => v.get(i).map_or(0.0, |x| *x as f32),
            UniformValue::UInt(v) => v.get(i).map_or(0.0, |x| *x as f32),
            UniformValue::Bool(v) => v.get(i).map_or(0.0, |x| f32::from(u8::from(*x))),
        }
    }

    /// Component `i` converted to `i32`.
    pub fn int_at(&self, i: usize) -> i32 {
        match self {
            UniformValue::Float(v) => v.get(i).map_or(0, |x| *x as i32),
            UniformValue::Int(v) => v.get(i).copied().unwrap_or(0),
            UniformValue::UInt(v) => v.get(i).map_or(0, |x| *x as i32),
            UniformValue::Bool(v) => v.get(i).map_or(0, |x| i32::from(*x)),
        }
    }

    /// Component `i` converted to `u32`.
    pub fn uint_at(&self, i: usize) -> u32 {
        match self {
            UniformValue::Float(v) => v.get(i).map_or(0, |x| *x as u32),
            UniformValue::Int(v) => v.get(i).map_or(0, |x| *x as u32),
            UniformValue::UInt(v) => v.get(i).copied().unwrap_or(0),
            UniformValue::Bool(v) => v.get(i).map_or(0, |x| u32::from(*x)),
        }
    }

    /// Component `i` converted to `bool`; any nonzero number is `true`.
    pub fn bool_at(&self, i: usize) -> bool {
        match self {
            UniformValue::Float(v) => v.get(i).is_some_and(|x| *x != 0.0),
            UniformValue::Int(v) => v.get(i).is_some_and(|x| *x != 0),
            UniformValue::UInt(v) => v.get(i).is_some_and(|x| *x != 0),
            UniformValue::Bool(v) => v.get(i).copied().unwrap_or(false),
        }
    }

    /// The first `count` components as floats, zero padded.
    pub fn to_floats(&self, count: usize) -> Vec<f32> {
        (0..count).map(|i| self.float_at(i)).collect()
    }

    /// The first `count` components as signed integers, zero padded.
    pub fn to_ints(&self, count: usize) -> Vec<i32> {
        (0..count).map(|i| self.int_at(i)).collect()
    }

    /// The first `count` components as unsigned integers, zero padded.
    pub fn to_uints(&self, count: usize) -> Vec<u32> {
        (0..count).map(|i| self.uint_at(i)).collect()
    }
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        UniformValue::Float(vec![value])
    }
}

impl From<i32> for UniformValue {
    fn from(value: i32) -> Self {
        UniformValue::Int(vec![value])
    }
}

impl From<u32> for UniformValue {
    fn from(value: u32) -> Self {
        UniformValue::UInt(vec![value])
    }
}

impl From<bool> for UniformValue {
    fn from(value: bool) -> Self {
        UniformValue::Bool(vec![value])
    }
}

impl<const N: usize> From<[f32; N]> for UniformValue {
    fn from(value: [f32; N]) -> Self {
        UniformValue::Float(value.to_vec())
    }
}

impl<const N: usize> From<[i32; N]> for UniformValue {
    fn from(value: [i32; N]) -> Self {
        UniformValue::Int(value.to_vec())
    }
}

impl<const N: usize> From<[u32; N]> for UniformValue {
    fn from(value: [u32; N]) -> Self {
        UniformValue::UInt(value.to_vec())
    }
}

impl<const N: usize> From<[bool; N]> for UniformValue {
    fn from(value: [bool; N]) -> Self {
        UniformValue::Bool(value.to_vec())
    }
}

/// Column-major matrices, one inner array per column.
impl<const C: usize, const R: usize> From<[[f32; R]; C]> for UniformValue {
    fn from(value: [[f32; R]; C]) -> Self {
        UniformValue::Float(value.iter().flatten().copied().collect())
    }
}

impl From<Vec<f32>> for UniformValue {
    fn from(value: Vec<f32>) -> Self {
        UniformValue::Float(value)
    }
}

impl From<Vec<i32>> for UniformValue {
    fn from(value: Vec<i32>) -> Self {
        UniformValue::Int(value)
    }
}
