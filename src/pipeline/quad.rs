use crate::runtime::{GraphicsContext, Topology, UsageHint, VertexAttributeLayout};

/// The corners of clip space, in triangle fan order: `(0, 1, 2)` and `(0, 2, 3)` cover the whole
/// viewport.
pub const QUAD_VERTICES: [f32; 8] = [-1.0, -1.0, 1.0, -1.0, 1.0, 1.0, -1.0, 1.0];

pub const QUAD_VERTEX_COUNT: i32 = 4;

pub const QUAD_TOPOLOGY: Topology = Topology::TriangleFan;

pub(crate) const POSITION_LAYOUT: VertexAttributeLayout = VertexAttributeLayout {
    components: 2,
    normalized: false,
    stride: 0,
    offset: 0,
};

/// Uploads [QUAD_VERTICES] into a new static buffer and points the position attribute at it.
///
/// The buffer is left bound to the array buffer binding point. When the program has no active
/// position attribute (`position_location` is `None`) the data is still uploaded, but no
/// attribute array is enabled.
pub(crate) fn upload<C>(context: &C, position_location: Option<u32>) -> Option<C::Buffer>
where
    C: GraphicsContext,
{
    let buffer = context.create_buffer()?;

    if let Some(location) = position_location {
        context.enable_vertex_attribute_array(location);
    }

    context.bind_array_buffer(Some(&buffer));
    context.array_buffer_data(&QUAD_VERTICES, UsageHint::StaticDraw);

    if let Some(location) = position_location {
        context.vertex_attribute_pointer(location, &POSITION_LAYOUT);
    }

    Some(buffer)
}
