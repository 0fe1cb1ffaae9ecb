use crate::components::quad::Quad;
use crate::components::texture::BlendMode;
use crate::renderer::instance::{QuadInstance, RenderBuffer};

/// Build the render buffer from a stage's quads.
/// Hidden, transparent and untextured quads are skipped; the rest are ordered
/// back-to-front by layer, then draw order, then insertion order.
pub fn build_render_buffer<'a>(quads: impl Iterator<Item = &'a Quad>, buffer: &mut RenderBuffer) {
    buffer.clear();

    let mut drawable: Vec<&Quad> = quads
        .filter(|q| q.visible && q.alpha > 0.0 && q.texture.is_some())
        .collect();
    drawable.sort_by_key(|q| (q.layer, q.order));

    for quad in drawable {
        let Some(texture) = quad.texture else { continue };
        let instance = QuadInstance {
            x: quad.pos.x,
            y: quad.pos.y,
            width: quad.size.x,
            height: quad.size.y,
            texture: texture.0 as f32,
            alpha: quad.alpha,
            tint: quad.tint,
            blend: match quad.blend {
                BlendMode::Alpha => 0.0,
                BlendMode::Additive => 1.0,
            },
        };
        if !buffer.push(instance) {
            log::warn!("render buffer full ({} quads), dropping the rest", buffer.capacity());
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{QuadId, TextureId};
    use crate::components::layer::RenderLayer;
    use glam::Vec2;

    fn textured(id: u32, layer: RenderLayer, order: i32) -> Quad {
        Quad::new(QuadId(id))
            .with_texture(TextureId(id))
            .with_layer(layer)
            .with_order(order)
            .with_size(Vec2::splat(10.0))
    }

    #[test]
    fn orders_back_to_front() {
        let quads = vec![
            textured(1, RenderLayer::Modal, 0),
            textured(2, RenderLayer::Backdrop, 0),
            textured(3, RenderLayer::Dialogue, 2),
            textured(4, RenderLayer::Dialogue, 1),
        ];
        let mut buf = RenderBuffer::new();
        build_render_buffer(quads.iter(), &mut buf);
        let order: Vec<f32> = buf.instances.iter().map(|i| i.texture).collect();
        assert_eq!(order, vec![2.0, 4.0, 3.0, 1.0]);
    }

    #[test]
    fn skips_hidden_transparent_and_untextured() {
        let quads = vec![
            textured(1, RenderLayer::Content, 0).hidden(),
            textured(2, RenderLayer::Content, 0).with_alpha(0.0),
            Quad::new(QuadId(3)),
            textured(4, RenderLayer::Content, 0),
        ];
        let mut buf = RenderBuffer::new();
        build_render_buffer(quads.iter(), &mut buf);
        assert_eq!(buf.instance_count(), 1);
        assert_eq!(buf.instances[0].texture, 4.0);
    }

    #[test]
    fn additive_quads_carry_blend_flag() {
        let quads = vec![textured(1, RenderLayer::Content, 0).with_blend(BlendMode::Additive)];
        let mut buf = RenderBuffer::new();
        build_render_buffer(quads.iter(), &mut buf);
        assert_eq!(buf.instances[0].blend, 1.0);
    }
}
