use crate::GlGraphics;
use crate::app::{App, Control};
use piston::input::RenderArgs;

use inline_tweak::tweak;

pub struct Renderer {
    pub gl: GlGraphics,
}

impl Renderer {
    pub fn render<C>(&mut self, app: &App, args: &RenderArgs, glyph_cache: &mut C)
    where
        C: graphics::character::CharacterCache<Texture = opengl_graphics::Texture>,
        <C as graphics::character::CharacterCache>::Error: std::fmt::Debug,
    {
        use graphics::*;

        const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
        const BACKGROUND: [f32; 4] = [0.62, 0.459, 0.392, 1.0];
        const BODY: [f32; 4] = [1.0, 0.737, 0.522, 1.0];
        const HEAD: [f32; 4] = [0.969, 0.471, 0.427, 1.0];
        const FOOD: [f32; 4] = [0.745, 0.871, 0.529, 1.0];
        const VIRUS: [f32; 4] = [0.573, 0.431, 0.78, 1.0];

        let (width, height) = (args.window_size[0], args.window_size[1]);
        let bounds = app.bounds();

        let c = self.gl.draw_begin(args.viewport());
        let gl = &mut self.gl;
        clear(BACKGROUND, gl);

        // field coordinates -> screen coordinates
        let field = c
            .transform
            .scale(width / bounds.width, height / bounds.height);

        for food in app.foods() {
            ellipse(
                FOOD,
                ellipse::circle(food.pos[0], food.pos[1], food.radius),
                field,
                gl,
            );
        }

        let outline = Ellipse::new_border(VIRUS, tweak!(1.5));
        for virus in app.viruses() {
            let rect = ellipse::circle(virus.pos[0], virus.pos[1], virus.radius);
            if virus.active {
                ellipse(VIRUS, rect, field, gl);
            } else {
                outline.draw(rect, &c.draw_state, field, gl);
            }
        }

        // tail first so the head ends up on top
        let worm = app.worm();
        for segment in worm.segments.iter().skip(1).rev() {
            ellipse(
                BODY,
                ellipse::circle(segment.pos[0], segment.pos[1], segment.radius),
                field,
                gl,
            );
        }
        let head = worm.head();
        ellipse(
            HEAD,
            ellipse::circle(head.pos[0], head.pos[1], head.radius),
            field,
            gl,
        );

        let mode = match app.control() {
            Control::Automatic => "auto",
            Control::Manual => "manual",
        };
        let display = format!(
            "tick: {}\nenergy: {:.2}\nsegments: {}\nmode: {}\nfood: {}\nviruses: {}",
            app.time(),
            worm.energy,
            worm.segments.len(),
            mode,
            app.foods().len(),
            app.viruses().len(),
        );
        let size = 18_usize;
        display_text(
            &display,
            glyph_cache,
            c.transform.trans(10., 10.),
            WHITE,
            size,
            gl,
        )
        .unwrap();

        self.gl.draw_end();
    }
}

/// displays multiline text
use graphics::types::Matrix2d;
fn display_text<C, G>(
    text: &str,
    glyph_cache: &mut C,
    // the left upper corner
    basetrans: Matrix2d,
    colour: [f32; 4],
    size: usize,
    graphics: &mut G,
) -> Result<(), <C as graphics::character::CharacterCache>::Error>
where
    G: graphics::Graphics,
    C: graphics::character::CharacterCache<Texture = G::Texture>,
    <C as graphics::character::CharacterCache>::Error: std::fmt::Debug,
{
    let basetrans = basetrans.trans(0., size as f64);
    use graphics::Transformed;
    text.split('\n').enumerate().try_for_each(|(idx, txt)| {
        graphics::text(
            colour,
            size as u32,
            txt,
            glyph_cache,
            basetrans.trans(0., (size * idx) as f64),
            graphics,
        )
    })
}
