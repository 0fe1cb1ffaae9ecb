use bytemuck::{Pod, Zeroable};

/// Per-quad render data read by the page's WebGL renderer.
/// Must match the TypeScript protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct QuadInstance {
    /// Centre X in canvas pixels (origin at canvas centre).
    pub x: f32,
    /// Centre Y in canvas pixels, Y up.
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Texture handle.
    pub texture: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// Brightness multiplier.
    pub tint: f32,
    /// 0.0 = alpha blend, 1.0 = additive.
    pub blend: f32,
}

impl QuadInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Render buffer containing all quad instances for one frame.
pub struct RenderBuffer {
    /// Instances back-to-front. The page switches blend state per instance.
    pub instances: Vec<QuadInstance>,
    capacity: usize,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    /// Returns false once the buffer is full.
    pub fn push(&mut self, instance: QuadInstance) -> bool {
        if self.instances.len() >= self.capacity {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Raw pointer to instance data for direct memory reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<QuadInstance>(), 32);
        assert_eq!(QuadInstance::FLOATS, 8);
    }

    #[test]
    fn push_stops_at_capacity() {
        let mut buf = RenderBuffer::with_capacity(2);
        assert!(buf.push(QuadInstance::default()));
        assert!(buf.push(QuadInstance::default()));
        assert!(!buf.push(QuadInstance::default()));
        assert_eq!(buf.instance_count(), 2);
    }
}
