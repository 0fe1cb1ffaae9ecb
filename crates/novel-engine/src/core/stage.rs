use glam::Vec2;
use crate::api::types::QuadId;
use crate::components::quad::Quad;

/// Flat quad storage owned by one scene.
/// Designed for the handful of UI quads a screen shows, not thousands.
pub struct Stage {
    quads: Vec<Quad>,
    next_id: u32,
}

impl Stage {
    pub fn new() -> Self {
        Self {
            quads: Vec::with_capacity(64),
            next_id: 1,
        }
    }

    /// Generate the next unique quad ID.
    pub fn next_id(&mut self) -> QuadId {
        let id = QuadId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Allocate an ID, build the quad and add it. Returns the new ID.
    pub fn spawn_with(&mut self, build: impl FnOnce(Quad) -> Quad) -> QuadId {
        let id = self.next_id();
        self.quads.push(build(Quad::new(id)));
        id
    }

    pub fn spawn(&mut self, quad: Quad) {
        self.quads.push(quad);
    }

    /// Remove a quad by ID. Returns the removed quad if found.
    pub fn despawn(&mut self, id: QuadId) -> Option<Quad> {
        let idx = self.quads.iter().position(|q| q.id == id)?;
        Some(self.quads.remove(idx))
    }

    pub fn get(&self, id: QuadId) -> Option<&Quad> {
        self.quads.iter().find(|q| q.id == id)
    }

    pub fn get_mut(&mut self, id: QuadId) -> Option<&mut Quad> {
        self.quads.iter_mut().find(|q| q.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Quad> {
        self.quads.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Quad> {
        self.quads.iter_mut()
    }

    pub fn find_by_tag(&self, tag: &str) -> Option<&Quad> {
        self.quads.iter().find(|q| q.tag == tag)
    }

    pub fn is_visible(&self, id: QuadId) -> bool {
        self.get(id).is_some_and(|q| q.visible)
    }

    pub fn set_visible(&mut self, id: QuadId, visible: bool) {
        if let Some(q) = self.get_mut(id) {
            q.visible = visible;
        }
    }

    /// Whether `point` lands on the quad (visible quads only).
    pub fn hits(&self, id: QuadId, point: Vec2) -> bool {
        self.get(id).is_some_and(|q| q.visible && q.contains(point))
    }

    /// Topmost visible quad under `point`, by layer then draw order.
    pub fn pick(&self, point: Vec2) -> Option<QuadId> {
        self.quads
            .iter()
            .filter(|q| q.visible && q.contains(point))
            .max_by_key(|q| (q.layer, q.order))
            .map(|q| q.id)
    }

    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    pub fn clear(&mut self) {
        self.quads.clear();
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::layer::RenderLayer;

    #[test]
    fn spawn_and_get() {
        let mut stage = Stage::new();
        let id = stage.spawn_with(|q| q.with_pos(Vec2::new(10.0, 20.0)));
        assert_eq!(stage.get(id).unwrap().pos, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn despawn_removes_quad() {
        let mut stage = Stage::new();
        let id = stage.spawn_with(|q| q);
        assert_eq!(stage.len(), 1);
        stage.despawn(id);
        assert!(stage.is_empty());
    }

    #[test]
    fn find_by_tag() {
        let mut stage = Stage::new();
        stage.spawn_with(|q| q.with_tag("gear"));
        let panel = stage.spawn_with(|q| q.with_tag("panel"));
        assert_eq!(stage.find_by_tag("panel").unwrap().id, panel);
    }

    #[test]
    fn pick_prefers_higher_layer() {
        let mut stage = Stage::new();
        let size = Vec2::splat(100.0);
        let back = stage.spawn_with(|q| q.with_size(size).with_layer(RenderLayer::Dialogue));
        let front = stage.spawn_with(|q| q.with_size(size).with_layer(RenderLayer::Modal));
        assert_eq!(stage.pick(Vec2::ZERO), Some(front));
        stage.set_visible(front, false);
        assert_eq!(stage.pick(Vec2::ZERO), Some(back));
        assert!(!stage.hits(front, Vec2::ZERO));
    }
}
