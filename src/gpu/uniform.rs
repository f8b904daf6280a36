//! Uniform Arena
//!
//! One uniform buffer holding several named parameter blocks at
//! offset-addressed positions. Each block's size is rounded up to a
//! multiple of 16 bytes (std140-style member alignment) and blocks are laid
//! out back to back, so the total buffer size is the sum of the rounded
//! sizes. The whole buffer is bound to a single binding point; shaders
//! address members by the same offsets.

use std::collections::HashMap;

use crate::errors::{GlintError, Result};

/// Block offsets are rounded to this boundary.
pub const BLOCK_ALIGN: u64 = 16;

/// A named block's position inside the arena buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
    /// Byte offset from the start of the buffer. Always a multiple of 16.
    pub offset: u64,
    /// Rounded block size in bytes. Always a multiple of 16.
    pub size: u64,
}

fn round_up(n: u64) -> u64 {
    let remainder = n % BLOCK_ALIGN;
    if remainder == 0 { n } else { n + BLOCK_ALIGN - remainder }
}

/// Computes the layout for a sequence of named blocks.
///
/// Returns the per-block ranges, in declaration order, and the total buffer
/// size. Blocks of sizes 12 and 64 yield offsets 0 and 16 and a total of 80.
#[must_use]
pub fn block_layout(blocks: &[(&str, u64)]) -> (Vec<(String, BlockRange)>, u64) {
    let mut ranges = Vec::with_capacity(blocks.len());
    let mut offset = 0;

    for (name, size) in blocks {
        let size = round_up(*size);
        ranges.push(((*name).to_string(), BlockRange { offset, size }));
        offset += size;
    }

    (ranges, offset)
}

/// A uniform buffer with named, offset-addressed parameter blocks.
pub struct UniformArena {
    buffer: wgpu::Buffer,
    blocks: HashMap<String, BlockRange>,
    size: u64,
}

impl UniformArena {
    /// Allocates a buffer sized for the given blocks.
    ///
    /// The layout is fixed at creation; blocks cannot be added later.
    #[must_use]
    pub fn new(device: &wgpu::Device, label: &str, blocks: &[(&str, u64)]) -> Self {
        let (ranges, size) = block_layout(blocks);

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            buffer,
            blocks: ranges.into_iter().collect(),
            size,
        }
    }

    /// Writes `data` into the named block.
    ///
    /// The write starts at the block's offset and must fit inside its
    /// rounded size.
    pub fn write_block(&self, queue: &wgpu::Queue, name: &str, data: &[u8]) -> Result<()> {
        let block = self
            .blocks
            .get(name)
            .ok_or_else(|| GlintError::UnknownUniformBlock(name.to_string()))?;

        if data.len() as u64 > block.size {
            return Err(GlintError::UniformBlockOverflow {
                block: name.to_string(),
                size: block.size,
                len: data.len() as u64,
            });
        }

        queue.write_buffer(&self.buffer, block.offset, data);
        Ok(())
    }

    /// Looks up a block's range.
    #[must_use]
    pub fn block(&self, name: &str) -> Option<BlockRange> {
        self.blocks.get(name).copied()
    }

    /// Binding resource covering the whole arena, for bind group entries.
    #[must_use]
    pub fn binding(&self) -> wgpu::BindingResource<'_> {
        self.buffer.as_entire_binding()
    }

    /// Total buffer size in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }
}
