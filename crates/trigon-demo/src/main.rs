//! Hello-triangle demo: one static triangle, fill color re-rolled ~1 Hz.

use anyhow::Result;

use trigon_engine::core::{App, AppControl, FrameCtx, InitCtx};
use trigon_engine::device::{BufferKind, GlBuffer, ShaderProgram, VertexArray, VertexAttribute};
use trigon_engine::logging::init_logging;
use trigon_engine::paint::{Color, ColorPulse};
use trigon_engine::window::{Runtime, RuntimeConfig};

/// Triangle vertices, XYZ per vertex, clip space.
const VERTICES: [f32; 9] = [
    -0.5, -0.5, 0.0, //
    0.5, -0.5, 0.0, //
    0.0, 0.5, 0.0,
];

const CLEAR_COLOR: Color = Color::new(0.2, 0.3, 0.3, 1.0);

/// Fill color until the first pulse fires (and forever when not animating).
const INITIAL_COLOR: Color = Color::new(0.2, 0.5, 1.0, 1.0);

/// Seconds between fill-color re-rolls.
const PULSE_PERIOD: f32 = 1.0;

const VERTEX_SHADER: &str = r#"#version 330 core
layout (location = 0) in vec3 aPosition;

void main() {
    gl_Position = vec4(aPosition, 1.0);
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 330 core
out vec4 FragColor;

uniform vec4 uColor;

void main() {
    FragColor = uColor;
}
"#;

/// Launch options.
struct Options {
    /// Re-roll the fill color once per second; `false` keeps [`INITIAL_COLOR`].
    animate: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { animate: true }
    }
}

struct TriangleApp {
    // The vertex array references this buffer; it must outlive every draw.
    _vbo: GlBuffer,
    vao: VertexArray,
    shader: ShaderProgram,
    color_loc: Option<glow::UniformLocation>,
    pulse: Option<ColorPulse>,
}

impl App<Options> for TriangleApp {
    fn init(ctx: &mut InitCtx<'_>, options: Options) -> Result<Self> {
        let gl = ctx.gl();

        let vbo = GlBuffer::new(gl.clone(), BufferKind::Vertex, &VERTICES)?;

        let mut vao = VertexArray::new(gl.clone())?;
        vao.link_attribute(&vbo, VertexAttribute::new(0, 3, 3, 0));

        let shader = ShaderProgram::new(gl, VERTEX_SHADER, FRAGMENT_SHADER)?;

        // Uniform lookup needs the linked program; activating it here also
        // lets the first frames draw before the pulse ever fires.
        shader.activate();
        let color_loc = shader.uniform_location("uColor");
        shader.set_color(color_loc.as_ref(), INITIAL_COLOR);

        log::info!(
            "scene ready: {} vertices, {} byte vertex buffer",
            VERTICES.len() / 3,
            vbo.byte_len()
        );

        Ok(Self {
            _vbo: vbo,
            vao,
            shader,
            color_loc,
            pulse: options.animate.then(|| ColorPulse::new(PULSE_PERIOD)),
        })
    }

    fn frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        // Color update first so a re-roll is visible in the frame that
        // computed it.
        if let Some(pulse) = self.pulse.as_mut() {
            if let Some(color) = pulse.tick(ctx.time.dt) {
                self.shader.activate();
                self.shader.set_color(self.color_loc.as_ref(), color);
            }
        }

        ctx.clear(CLEAR_COLOR);
        self.vao.bind();
        self.shader.activate();
        ctx.draw_triangles(0, (VERTICES.len() / 3) as i32);

        AppControl::Continue
    }
}

fn main() -> Result<()> {
    init_logging(None);

    let config = RuntimeConfig {
        title: "Trigon".to_string(),
        ..RuntimeConfig::default()
    };

    Runtime::run::<TriangleApp, _>(config, Options::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_data_is_whole_triangles() {
        assert_eq!(VERTICES.len() % 3, 0);
        assert_eq!(VERTICES.len() / 3, 3);
    }

    #[test]
    fn vertex_shader_reads_location_zero() {
        assert!(VERTEX_SHADER.contains("layout (location = 0)"));
    }

    #[test]
    fn fragment_shader_reads_the_color_uniform() {
        assert!(FRAGMENT_SHADER.contains("uniform vec4 uColor"));
    }
}
