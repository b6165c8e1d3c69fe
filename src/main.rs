//! Wormfield is a small fixed-timestep simulation of a growing,
//! energy-burning worm.
//!
//! The worm is a chain of circles dragged behind a moving head. It hunts the
//! nearest food particle inside its vision range, and everything it does
//! runs off one scalar energy budget: accelerating drains it, eating refills
//! it, and the whole body profile (segment radii, even the segment count) is
//! re-derived from it every time it changes. Run out of energy while moving
//! and the worm dies and respawns in the center of the field.
//!
//! Food particles pop up at random and slowly shrink away. Viruses do too,
//! but after a short dormancy they wake up and start hunting the worm head;
//! touching one costs a chunk of energy.
//!
//! The interesting bits live in the worm module (segment-chain relaxation
//! and the energy-to-body-profile function). The app module steps the world,
//! the renderer draws it, and this file is the usual piston glue.
//!
//! Key bindings: arrows/WASD steer, Space toggles manual/automatic control,
//! P pauses, NumPad +/- changes the simulation speed, R prints a report.

use opengl_graphics::{GlGraphics, OpenGL};
use sdl2_window::Sdl2Window as Window;

use piston::event_loop::{EventLoop, EventSettings, Events};
use piston::input;
use piston::input::{ButtonEvent, RenderEvent, UpdateEvent};
use piston::window::WindowSettings;

mod config;

mod vecmath;

mod food;

mod virus;

mod worm;

mod app;
use app::{App, InputState};

mod renderer;
use renderer::Renderer;

fn main() {
    #[cfg(feature = "debug")]
    init_logging();

    // fixme: i don't want to manually be guessing opengl versions
    let opengl = OpenGL::V4_5;

    let mut window: Window = WindowSettings::new(
        "wormfield",
        [config::WINDOW_WIDTH as u32, config::WINDOW_HEIGHT as u32],
    )
    .graphics_api(opengl)
    .exit_on_esc(true)
    .build()
    .unwrap();

    let bounds = config::Bounds {
        width: config::WINDOW_WIDTH,
        height: config::WINDOW_HEIGHT,
    };
    let mut app = App::new(bounds, 1234);

    // graphics stuff
    let mut render = Renderer {
        gl: GlGraphics::new(opengl),
    };

    let ts = opengl_graphics::TextureSettings::new();

    // font_kit is a bit "heavy" i only need font loading, could not really find a good other lib
    // for that though.
    use font_kit::family_name::FamilyName;
    use font_kit::handle::Handle;
    use font_kit::properties::Properties;
    use font_kit::source::SystemSource;

    let fontprops = Properties::new();
    let fontfam = [
        FamilyName::Title("FiraCode".to_owned()),
        FamilyName::SansSerif,
    ];
    let handle = SystemSource::new()
        .select_best_match(&fontfam, &fontprops)
        .unwrap();
    let fontdata: Result<std::path::PathBuf, Vec<u8>> = match handle {
        Handle::Path { path, .. } => Ok(path),
        Handle::Memory { bytes, .. } => Err((*bytes).clone()),
    };
    let mut cache = match fontdata.as_ref() {
        Ok(path) => {
            println!("using font: {:?}", path);
            opengl_graphics::GlyphCache::new(path, (), ts).unwrap()
        }
        Err(bytes) => opengl_graphics::GlyphCache::from_bytes(bytes, (), ts).unwrap(),
    };
    // end of graphics stuff

    // input and event handling
    let mut held = InputState::default();
    let mut speed = 1;
    let mut pause = false;

    let mut events = Events::new(
        EventSettings::new()
            .ups((1. / config::STEP_SIZE) as u64)
            .max_fps(config::RENDER_FPS),
    );
    while let Some(e) = events.next(&mut window) {
        if let Some(args) = e.button_args() {
            use input::keyboard::Key;
            let press = args.state == input::ButtonState::Press;
            match args.button {
                input::Button::Keyboard(Key::Up | Key::W) => held.up = press,
                input::Button::Keyboard(Key::Down | Key::S) => held.down = press,
                input::Button::Keyboard(Key::Left | Key::A) => held.left = press,
                input::Button::Keyboard(Key::Right | Key::D) => held.right = press,
                input::Button::Keyboard(Key::Space) => {
                    if args.state == input::ButtonState::Release {
                        let mode = app.toggle_control();
                        println!("control now {:?}", mode);
                    }
                }
                input::Button::Keyboard(Key::P) => {
                    if args.state == input::ButtonState::Release {
                        pause = !pause;
                        println!("pausing {}", pause);
                    }
                }
                input::Button::Keyboard(Key::R) => {
                    if args.state == input::ButtonState::Release {
                        app.report()
                    }
                }
                input::Button::Keyboard(Key::NumPadPlus) => {
                    if args.state == input::ButtonState::Release {
                        speed += 1;
                        println!("now running {} updates per update", speed);
                    }
                }
                input::Button::Keyboard(Key::NumPadMinus) => {
                    if args.state == input::ButtonState::Release {
                        if speed > 1 {
                            speed -= 1;
                        }
                        println!("now running {} updates per update", speed);
                    }
                }
                input::Button::Keyboard(k) => {
                    println!("unhandled keypress: {:?} ({:?})", k, args.button);
                }
                input::Button::Mouse(_) => (),
                input::Button::Controller(_) => (),
                input::Button::Hat(_) => (),
            }
        }
        if let Some(args) = e.render_args() {
            render.render(&app, &args, &mut cache);
        }

        if e.update_args().is_some() && !pause {
            // always running fixed steps, speed only changes how many per update
            for _ in 0..speed {
                app.update(&held);
            }
        }
    }
}

#[cfg(feature = "debug")]
fn init_logging() {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} {} {} {}",
                chrono::Local::now().format("%H:%M:%S%.6f"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .chain(
            std::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open("wormfield.log")
                .expect("opening log file failed"),
        )
        .apply()
        .expect("logging initialization failed");
}
