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

//! Framebuffer attachment descriptors and texture targets.

use super::gl;
use serde::{Deserialize, Serialize};

/// A named slot on a framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttachmentPoint {
    /// Color attachment `n`, `0..=15`.
    Color(u8),
    /// Depth only.
    Depth,
    /// Stencil only.
    Stencil,
    /// Combined depth and stencil.
    DepthStencil,
}

impl AttachmentPoint {
    /// The highest color attachment index.
    pub const MAX_COLOR: u8 = 15;

    /// Returns the color index for color points.
    pub const fn color_index(self) -> Option<u8> {
        match self {
            AttachmentPoint::Color(n) => Some(n),
            _ => None,
        }
    }

    /// Maps the point onto its desktop GL attachment enumerant.
    ///
    /// Returns `None` for color indices above [`Self::MAX_COLOR`].
    pub const fn to_gl(self) -> Option<u32> {
        match self {
            AttachmentPoint::Color(n) if n <= Self::MAX_COLOR => {
                Some(gl::COLOR_ATTACHMENT0 + n as u32)
            }
            AttachmentPoint::Color(_) => None,
            AttachmentPoint::Depth => Some(gl::DEPTH_ATTACHMENT),
            AttachmentPoint::Stencil => Some(gl::STENCIL_ATTACHMENT),
            AttachmentPoint::DepthStencil => Some(gl::DEPTH_STENCIL_ATTACHMENT),
        }
    }
}

/// A cube map face, or all of them at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CubeMapFace {
    #[default]
    /// +X.
    PositiveX,
    /// -X.
    NegativeX,
    /// +Y.
    PositiveY,
    /// -Y.
    NegativeY,
    /// +Z.
    PositiveZ,
    /// -Z.
    NegativeZ,
    /// Every face as a layered attachment.
    AllFaces,
}

impl CubeMapFace {
    /// The face's texture target enumerant, `None` for [`CubeMapFace::AllFaces`].
    pub const fn to_gl(self) -> Option<u32> {
        match self {
            CubeMapFace::PositiveX => Some(gl::TEXTURE_CUBE_MAP_POSITIVE_X),
            CubeMapFace::NegativeX => Some(gl::TEXTURE_CUBE_MAP_NEGATIVE_X),
            CubeMapFace::PositiveY => Some(gl::TEXTURE_CUBE_MAP_POSITIVE_Y),
            CubeMapFace::NegativeY => Some(gl::TEXTURE_CUBE_MAP_NEGATIVE_Y),
            CubeMapFace::PositiveZ => Some(gl::TEXTURE_CUBE_MAP_POSITIVE_Z),
            CubeMapFace::NegativeZ => Some(gl::TEXTURE_CUBE_MAP_NEGATIVE_Z),
            CubeMapFace::AllFaces => None,
        }
    }

    /// The face index in layer-face order, `None` for [`CubeMapFace::AllFaces`].
    pub const fn index(self) -> Option<i32> {
        match self {
            CubeMapFace::AllFaces => None,
            face => Some(face as i32),
        }
    }
}

/// Where a texture or render buffer is attached on a framebuffer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attachment {
    /// The attachment name, informational only.
    pub name: String,
    /// The framebuffer slot.
    pub point: AttachmentPoint,
    /// The cube face, ignored for non cube textures.
    pub face: CubeMapFace,
    /// The mip level to attach.
    pub mip_level: i32,
    /// The layer of array and 3D textures.
    pub layer: i32,
}

impl Attachment {
    /// An attachment of mip 0, layer 0 at `point`.
    pub fn new(point: AttachmentPoint) -> Self {
        Self {
            name: String::new(),
            point,
            face: CubeMapFace::default(),
            mip_level: 0,
            layer: 0,
        }
    }

    /// Returns a copy targeting the given cube face.
    pub fn with_face(mut self, face: CubeMapFace) -> Self {
        self.face = face;
        self
    }

    /// Returns a copy targeting the given mip level.
    pub fn with_mip_level(mut self, mip_level: i32) -> Self {
        self.mip_level = mip_level;
        self
    }

    /// Returns a copy targeting the given layer.
    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }
}

/// The dimensionality of a texture object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureTarget {
    /// 1D.
    Target1D,
    /// 1D array.
    Target1DArray,
    /// 2D.
    Target2D,
    /// 2D array.
    Target2DArray,
    /// 3D.
    Target3D,
    /// Cube map.
    CubeMap,
    /// Cube map array.
    CubeMapArray,
    /// 2D multisample.
    Target2DMultisample,
    /// 2D multisample array.
    Target2DMultisampleArray,
    /// Rectangle.
    Rectangle,
    /// Buffer texture.
    Buffer,
}

impl TextureTarget {
    /// The GL target enumerant.
    pub const fn to_gl(self) -> u32 {
        match self {
            TextureTarget::Target1D => gl::TEXTURE_1D,
            TextureTarget::Target1DArray => gl::TEXTURE_1D_ARRAY,
            TextureTarget::Target2D => gl::TEXTURE_2D,
            TextureTarget::Target2DArray => gl::TEXTURE_2D_ARRAY,
            TextureTarget::Target3D => gl::TEXTURE_3D,
            TextureTarget::CubeMap => gl::TEXTURE_CUBE_MAP,
            TextureTarget::CubeMapArray => gl::TEXTURE_CUBE_MAP_ARRAY,
            TextureTarget::Target2DMultisample => gl::TEXTURE_2D_MULTISAMPLE,
            TextureTarget::Target2DMultisampleArray => gl::TEXTURE_2D_MULTISAMPLE_ARRAY,
            TextureTarget::Rectangle => gl::TEXTURE_RECTANGLE,
            TextureTarget::Buffer => gl::TEXTURE_BUFFER,
        }
    }

    /// Returns `true` for targets attached one layer at a time.
    pub const fn is_layered(self) -> bool {
        matches!(
            self,
            TextureTarget::Target1DArray
                | TextureTarget::Target2DArray
                | TextureTarget::Target2DMultisampleArray
                | TextureTarget::Target3D
        )
    }
}

/// A native texture object together with its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureBinding {
    /// The native texture name.
    pub id: u32,
    /// The texture's target.
    pub target: TextureTarget,
}

impl TextureBinding {
    /// Creates a binding descriptor.
    pub const fn new(id: u32, target: TextureTarget) -> Self {
        Self { id, target }
    }
}

/// Which framebuffer binding points a bind affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FboBindMode {
    /// Draw framebuffer only.
    Draw,
    /// Read framebuffer only.
    Read,
    /// Both.
    #[default]
    ReadAndDraw,
}

impl FboBindMode {
    /// The GL target enumerant on APIs with split read and draw bindings.
    pub const fn to_gl(self) -> u32 {
        match self {
            FboBindMode::Draw => gl::DRAW_FRAMEBUFFER,
            FboBindMode::Read => gl::READ_FRAMEBUFFER,
            FboBindMode::ReadAndDraw => gl::FRAMEBUFFER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_points_map_to_gl() {
        assert_eq!(AttachmentPoint::Color(0).to_gl(), Some(gl::COLOR_ATTACHMENT0));
        assert_eq!(
            AttachmentPoint::Color(15).to_gl(),
            Some(gl::COLOR_ATTACHMENT0 + 15)
        );
        assert_eq!(AttachmentPoint::Color(16).to_gl(), None);
        assert_eq!(AttachmentPoint::Depth.to_gl(), Some(gl::DEPTH_ATTACHMENT));
        assert_eq!(
            AttachmentPoint::DepthStencil.to_gl(),
            Some(gl::DEPTH_STENCIL_ATTACHMENT)
        );
    }

    #[test]
    fn cube_faces_follow_gl_order() {
        assert_eq!(CubeMapFace::PositiveX.index(), Some(0));
        assert_eq!(CubeMapFace::NegativeZ.index(), Some(5));
        assert_eq!(CubeMapFace::AllFaces.index(), None);
        assert_eq!(
            CubeMapFace::NegativeY.to_gl(),
            Some(gl::TEXTURE_CUBE_MAP_NEGATIVE_Y)
        );
    }

    #[test]
    fn bind_modes() {
        assert_eq!(FboBindMode::Draw.to_gl(), 0x8CA9);
        assert_eq!(FboBindMode::Read.to_gl(), 0x8CA8);
        assert_eq!(FboBindMode::ReadAndDraw.to_gl(), gl::FRAMEBUFFER);
    }

    #[test]
    fn builder_sets_fields() {
        let attachment = Attachment::new(AttachmentPoint::Color(2))
            .with_face(CubeMapFace::PositiveY)
            .with_mip_level(3)
            .with_layer(4);
        assert_eq!(attachment.mip_level, 3);
        assert_eq!(attachment.layer, 4);
        assert_eq!(attachment.face, CubeMapFace::PositiveY);
    }
}
