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

//! Native GL enumerants used by the helper family and the reflection descriptors.
//!
//! Descriptors keep these raw values since they are what the driver reports
//! and expects. The engine-level view of a type is [`UniformType`](super::UniformType).

#![allow(missing_docs)]

// Primitive and index types
pub const BYTE: u32 = 0x1400;
pub const UNSIGNED_BYTE: u32 = 0x1401;
pub const SHORT: u32 = 0x1402;
pub const UNSIGNED_SHORT: u32 = 0x1403;
pub const INT: u32 = 0x1404;
pub const UNSIGNED_INT: u32 = 0x1405;
pub const FLOAT: u32 = 0x1406;
pub const DOUBLE: u32 = 0x140A;

pub const POINTS: u32 = 0x0000;
pub const LINES: u32 = 0x0001;
pub const TRIANGLES: u32 = 0x0004;
pub const TRIANGLE_STRIP: u32 = 0x0005;
pub const PATCHES: u32 = 0x000E;

// Shader data types
pub const FLOAT_VEC2: u32 = 0x8B50;
pub const FLOAT_VEC3: u32 = 0x8B51;
pub const FLOAT_VEC4: u32 = 0x8B52;
pub const INT_VEC2: u32 = 0x8B53;
pub const INT_VEC3: u32 = 0x8B54;
pub const INT_VEC4: u32 = 0x8B55;
pub const BOOL: u32 = 0x8B56;
pub const BOOL_VEC2: u32 = 0x8B57;
pub const BOOL_VEC3: u32 = 0x8B58;
pub const BOOL_VEC4: u32 = 0x8B59;
pub const FLOAT_MAT2: u32 = 0x8B5A;
pub const FLOAT_MAT3: u32 = 0x8B5B;
pub const FLOAT_MAT4: u32 = 0x8B5C;
pub const FLOAT_MAT2X3: u32 = 0x8B65;
pub const FLOAT_MAT2X4: u32 = 0x8B66;
pub const FLOAT_MAT3X2: u32 = 0x8B67;
pub const FLOAT_MAT3X4: u32 = 0x8B68;
pub const FLOAT_MAT4X2: u32 = 0x8B69;
pub const FLOAT_MAT4X3: u32 = 0x8B6A;
pub const UNSIGNED_INT_VEC2: u32 = 0x8DC6;
pub const UNSIGNED_INT_VEC3: u32 = 0x8DC7;
pub const UNSIGNED_INT_VEC4: u32 = 0x8DC8;
pub const DOUBLE_VEC2: u32 = 0x8FFC;
pub const DOUBLE_VEC3: u32 = 0x8FFD;
pub const DOUBLE_VEC4: u32 = 0x8FFE;

// Samplers
pub const SAMPLER_1D: u32 = 0x8B5D;
pub const SAMPLER_2D: u32 = 0x8B5E;
pub const SAMPLER_3D: u32 = 0x8B5F;
pub const SAMPLER_CUBE: u32 = 0x8B60;
pub const SAMPLER_1D_SHADOW: u32 = 0x8B61;
pub const SAMPLER_2D_SHADOW: u32 = 0x8B62;
pub const SAMPLER_2D_RECT: u32 = 0x8B63;
pub const SAMPLER_2D_RECT_SHADOW: u32 = 0x8B64;
pub const SAMPLER_1D_ARRAY: u32 = 0x8DC0;
pub const SAMPLER_2D_ARRAY: u32 = 0x8DC1;
pub const SAMPLER_BUFFER: u32 = 0x8DC2;
pub const SAMPLER_1D_ARRAY_SHADOW: u32 = 0x8DC3;
pub const SAMPLER_2D_ARRAY_SHADOW: u32 = 0x8DC4;
pub const SAMPLER_CUBE_SHADOW: u32 = 0x8DC5;
pub const INT_SAMPLER_1D: u32 = 0x8DC9;
pub const INT_SAMPLER_2D: u32 = 0x8DCA;
pub const INT_SAMPLER_3D: u32 = 0x8DCB;
pub const INT_SAMPLER_CUBE: u32 = 0x8DCC;
pub const INT_SAMPLER_2D_RECT: u32 = 0x8DCD;
pub const INT_SAMPLER_1D_ARRAY: u32 = 0x8DCE;
pub const INT_SAMPLER_2D_ARRAY: u32 = 0x8DCF;
pub const INT_SAMPLER_BUFFER: u32 = 0x8DD0;
pub const UNSIGNED_INT_SAMPLER_1D: u32 = 0x8DD1;
pub const UNSIGNED_INT_SAMPLER_2D: u32 = 0x8DD2;
pub const UNSIGNED_INT_SAMPLER_3D: u32 = 0x8DD3;
pub const UNSIGNED_INT_SAMPLER_CUBE: u32 = 0x8DD4;
pub const UNSIGNED_INT_SAMPLER_2D_RECT: u32 = 0x8DD5;
pub const UNSIGNED_INT_SAMPLER_1D_ARRAY: u32 = 0x8DD6;
pub const UNSIGNED_INT_SAMPLER_2D_ARRAY: u32 = 0x8DD7;
pub const UNSIGNED_INT_SAMPLER_BUFFER: u32 = 0x8DD8;
pub const SAMPLER_CUBE_MAP_ARRAY: u32 = 0x900C;
pub const SAMPLER_CUBE_MAP_ARRAY_SHADOW: u32 = 0x900D;
pub const INT_SAMPLER_CUBE_MAP_ARRAY: u32 = 0x900E;
pub const UNSIGNED_INT_SAMPLER_CUBE_MAP_ARRAY: u32 = 0x900F;
pub const SAMPLER_2D_MULTISAMPLE: u32 = 0x9108;
pub const INT_SAMPLER_2D_MULTISAMPLE: u32 = 0x9109;
pub const UNSIGNED_INT_SAMPLER_2D_MULTISAMPLE: u32 = 0x910A;
pub const SAMPLER_2D_MULTISAMPLE_ARRAY: u32 = 0x910B;
pub const INT_SAMPLER_2D_MULTISAMPLE_ARRAY: u32 = 0x910C;
pub const UNSIGNED_INT_SAMPLER_2D_MULTISAMPLE_ARRAY: u32 = 0x910D;

// Images
pub const IMAGE_1D: u32 = 0x904C;
pub const IMAGE_2D: u32 = 0x904D;
pub const IMAGE_3D: u32 = 0x904E;
pub const IMAGE_2D_RECT: u32 = 0x904F;
pub const IMAGE_CUBE: u32 = 0x9050;
pub const IMAGE_BUFFER: u32 = 0x9051;
pub const IMAGE_1D_ARRAY: u32 = 0x9052;
pub const IMAGE_2D_ARRAY: u32 = 0x9053;
pub const IMAGE_CUBE_MAP_ARRAY: u32 = 0x9054;
pub const IMAGE_2D_MULTISAMPLE: u32 = 0x9055;
pub const IMAGE_2D_MULTISAMPLE_ARRAY: u32 = 0x9056;
pub const INT_IMAGE_1D: u32 = 0x9057;
pub const INT_IMAGE_2D: u32 = 0x9058;
pub const INT_IMAGE_3D: u32 = 0x9059;
pub const INT_IMAGE_2D_RECT: u32 = 0x905A;
pub const INT_IMAGE_CUBE: u32 = 0x905B;
pub const INT_IMAGE_BUFFER: u32 = 0x905C;
pub const INT_IMAGE_1D_ARRAY: u32 = 0x905D;
pub const INT_IMAGE_2D_ARRAY: u32 = 0x905E;
pub const INT_IMAGE_CUBE_MAP_ARRAY: u32 = 0x905F;
pub const INT_IMAGE_2D_MULTISAMPLE: u32 = 0x9060;
pub const INT_IMAGE_2D_MULTISAMPLE_ARRAY: u32 = 0x9061;
pub const UNSIGNED_INT_IMAGE_1D: u32 = 0x9062;
pub const UNSIGNED_INT_IMAGE_2D: u32 = 0x9063;
pub const UNSIGNED_INT_IMAGE_3D: u32 = 0x9064;
pub const UNSIGNED_INT_IMAGE_2D_RECT: u32 = 0x9065;
pub const UNSIGNED_INT_IMAGE_CUBE: u32 = 0x9066;
pub const UNSIGNED_INT_IMAGE_BUFFER: u32 = 0x9067;
pub const UNSIGNED_INT_IMAGE_1D_ARRAY: u32 = 0x9068;
pub const UNSIGNED_INT_IMAGE_2D_ARRAY: u32 = 0x9069;
pub const UNSIGNED_INT_IMAGE_CUBE_MAP_ARRAY: u32 = 0x906A;
pub const UNSIGNED_INT_IMAGE_2D_MULTISAMPLE: u32 = 0x906B;
pub const UNSIGNED_INT_IMAGE_2D_MULTISAMPLE_ARRAY: u32 = 0x906C;

// Program reflection
pub const ACTIVE_UNIFORMS: u32 = 0x8B86;
pub const ACTIVE_ATTRIBUTES: u32 = 0x8B89;
pub const ACTIVE_UNIFORM_BLOCKS: u32 = 0x8A36;
pub const UNIFORM_BLOCK_INDEX: u32 = 0x8A3A;
pub const UNIFORM_OFFSET: u32 = 0x8A3B;
pub const UNIFORM_ARRAY_STRIDE: u32 = 0x8A3C;
pub const UNIFORM_MATRIX_STRIDE: u32 = 0x8A3D;
pub const UNIFORM_BLOCK_BINDING: u32 = 0x8A3F;
pub const UNIFORM_BLOCK_DATA_SIZE: u32 = 0x8A40;
pub const UNIFORM_BLOCK_ACTIVE_UNIFORMS: u32 = 0x8A42;
pub const UNIFORM: u32 = 0x92E1;
pub const UNIFORM_BLOCK: u32 = 0x92E2;
pub const SHADER_STORAGE_BLOCK: u32 = 0x92E6;
pub const ACTIVE_RESOURCES: u32 = 0x92F5;
pub const BUFFER_BINDING: u32 = 0x9302;
pub const BUFFER_DATA_SIZE: u32 = 0x9303;
pub const NUM_ACTIVE_VARIABLES: u32 = 0x9304;

// Buffers
pub const ARRAY_BUFFER: u32 = 0x8892;
pub const ELEMENT_ARRAY_BUFFER: u32 = 0x8893;
pub const UNIFORM_BUFFER: u32 = 0x8A11;
pub const SHADER_STORAGE_BUFFER: u32 = 0x90D2;
pub const DRAW_INDIRECT_BUFFER: u32 = 0x8F3F;
pub const READ_WRITE: u32 = 0x88BA;
pub const MAP_READ_BIT: u32 = 0x0001;
pub const MAP_WRITE_BIT: u32 = 0x0002;

// Framebuffers
pub const FRAMEBUFFER: u32 = 0x8D40;
pub const READ_FRAMEBUFFER: u32 = 0x8CA8;
pub const DRAW_FRAMEBUFFER: u32 = 0x8CA9;
pub const FRAMEBUFFER_BINDING: u32 = 0x8CA6;
pub const FRAMEBUFFER_COMPLETE: u32 = 0x8CD5;
pub const RENDERBUFFER: u32 = 0x8D41;
pub const RENDERBUFFER_WIDTH: u32 = 0x8D42;
pub const RENDERBUFFER_HEIGHT: u32 = 0x8D43;
pub const COLOR_ATTACHMENT0: u32 = 0x8CE0;
pub const DEPTH_ATTACHMENT: u32 = 0x8D00;
pub const STENCIL_ATTACHMENT: u32 = 0x8D20;
pub const DEPTH_STENCIL_ATTACHMENT: u32 = 0x821A;
pub const COLOR: u32 = 0x1800;

// Textures
pub const TEXTURE_1D: u32 = 0x0DE0;
pub const TEXTURE_2D: u32 = 0x0DE1;
pub const TEXTURE_3D: u32 = 0x806F;
pub const TEXTURE_RECTANGLE: u32 = 0x84F5;
pub const TEXTURE_CUBE_MAP: u32 = 0x8513;
pub const TEXTURE_CUBE_MAP_POSITIVE_X: u32 = 0x8515;
pub const TEXTURE_CUBE_MAP_NEGATIVE_X: u32 = 0x8516;
pub const TEXTURE_CUBE_MAP_POSITIVE_Y: u32 = 0x8517;
pub const TEXTURE_CUBE_MAP_NEGATIVE_Y: u32 = 0x8518;
pub const TEXTURE_CUBE_MAP_POSITIVE_Z: u32 = 0x8519;
pub const TEXTURE_CUBE_MAP_NEGATIVE_Z: u32 = 0x851A;
pub const TEXTURE_1D_ARRAY: u32 = 0x8C18;
pub const TEXTURE_2D_ARRAY: u32 = 0x8C1A;
pub const TEXTURE_BUFFER: u32 = 0x8C2A;
pub const TEXTURE_CUBE_MAP_ARRAY: u32 = 0x9009;
pub const TEXTURE_2D_MULTISAMPLE: u32 = 0x9100;
pub const TEXTURE_2D_MULTISAMPLE_ARRAY: u32 = 0x9102;
pub const TEXTURE_WIDTH: u32 = 0x1000;
pub const TEXTURE_HEIGHT: u32 = 0x1001;

// Capabilities and state
pub const BLEND: u32 = 0x0BE2;
pub const DEPTH_TEST: u32 = 0x0B71;
pub const ALPHA_TEST: u32 = 0x0BC0;
pub const MULTISAMPLE: u32 = 0x809D;
pub const SAMPLE_ALPHA_TO_COVERAGE: u32 = 0x809E;
pub const CLIP_DISTANCE0: u32 = 0x3000;
pub const MAX_CLIP_DISTANCES: u32 = 0x0D32;
pub const POINT_SPRITE: u32 = 0x8861;
pub const PROGRAM_POINT_SIZE: u32 = 0x8642;
pub const PRIMITIVE_RESTART: u32 = 0x8F9D;
pub const TEXTURE_CUBE_MAP_SEAMLESS: u32 = 0x884F;
pub const PATCH_VERTICES: u32 = 0x8E72;

// Sync objects
pub const SYNC_GPU_COMMANDS_COMPLETE: u32 = 0x9117;
pub const SYNC_FLUSH_COMMANDS_BIT: u32 = 0x0000_0001;
pub const SYNC_STATUS: u32 = 0x9114;
pub const SIGNALED: i32 = 0x9119;
pub const UNSIGNALED: i32 = 0x9118;
pub const TIMEOUT_IGNORED: u64 = 0xFFFF_FFFF_FFFF_FFFF;
pub const WAIT_FAILED: u32 = 0x911D;

// Memory barrier bits
pub const VERTEX_ATTRIB_ARRAY_BARRIER_BIT: u32 = 0x0000_0001;
pub const ELEMENT_ARRAY_BARRIER_BIT: u32 = 0x0000_0002;
pub const UNIFORM_BARRIER_BIT: u32 = 0x0000_0004;
pub const TEXTURE_FETCH_BARRIER_BIT: u32 = 0x0000_0008;
pub const SHADER_IMAGE_ACCESS_BARRIER_BIT: u32 = 0x0000_0020;
pub const COMMAND_BARRIER_BIT: u32 = 0x0000_0040;
pub const PIXEL_BUFFER_BARRIER_BIT: u32 = 0x0000_0080;
pub const TEXTURE_UPDATE_BARRIER_BIT: u32 = 0x0000_0100;
pub const BUFFER_UPDATE_BARRIER_BIT: u32 = 0x0000_0200;
pub const FRAMEBUFFER_BARRIER_BIT: u32 = 0x0000_0400;
pub const TRANSFORM_FEEDBACK_BARRIER_BIT: u32 = 0x0000_0800;
pub const ATOMIC_COUNTER_BARRIER_BIT: u32 = 0x0000_1000;
pub const SHADER_STORAGE_BARRIER_BIT: u32 = 0x0000_2000;
pub const QUERY_BUFFER_BARRIER_BIT: u32 = 0x0000_8000;
pub const ALL_BARRIER_BITS: u32 = 0xFFFF_FFFF;

// Comparison functions, blending, faces
pub const NEVER: u32 = 0x0200;
pub const LESS: u32 = 0x0201;
pub const LEQUAL: u32 = 0x0203;
pub const GREATER: u32 = 0x0204;
pub const ALWAYS: u32 = 0x0207;
pub const FUNC_ADD: u32 = 0x8006;
pub const ONE: u32 = 1;
pub const ZERO: u32 = 0;
pub const SRC_ALPHA: u32 = 0x0302;
pub const ONE_MINUS_SRC_ALPHA: u32 = 0x0303;
pub const CW: u32 = 0x0900;
pub const CCW: u32 = 0x0901;
pub const FRONT_AND_BACK: u32 = 0x0408;
pub const FILL: u32 = 0x1B02;
pub const LINE: u32 = 0x1B01;
pub const NEAREST: u32 = 0x2600;
pub const LINEAR: u32 = 0x2601;
pub const COLOR_BUFFER_BIT: u32 = 0x0000_4000;
pub const DEPTH_BUFFER_BIT: u32 = 0x0000_0100;
pub const STENCIL_BUFFER_BIT: u32 = 0x0000_0400;
pub const READ_ONLY: u32 = 0x88B8;
pub const RGBA8: u32 = 0x8058;
