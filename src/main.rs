use std::io;
use std::thread;
use std::time;
use std::time::Duration;
use std::time::Instant;

use anyhow::Context;
use crossterm::cursor;
use crossterm::event;
use crossterm::event::Event as CtEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use crossterm::execute;
use crossterm::style;
use crossterm::terminal;
use glam::DVec3;
use tracing::info;
use tracing_subscriber::EnvFilter;

use facetree::ScreenSize;
use facetree::camera::Camera;
use facetree::camera::Viewport;
use facetree::config::LodConfig;
use facetree::cube::CubeSphere;
use facetree::visit::LeafRenderer;

const FRAMERATE: u32 = 60;
const FRAMETIME: time::Duration =
    time::Duration::from_millis(((1f64 / FRAMERATE as f64) * 1_000f64) as u64);

/// Anything deeper is finer than a braille dot.
const TERMINAL_MAX_DEPTH: u32 = 12;

const SPLIT_FACTOR_RANGE: (f64, f64) = (1.0, 3.0);
const SPLIT_FACTOR_STEP: f64 = 0.1;

/// Radians per key press
const TURN_STEP: f64 = 0.05;

/// Radians per second while orbiting
const ORBIT_SPEED: f64 = 0.5;

enum Event {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    SplitUp,
    SplitDown,
    DepthUp,
    DepthDown,
    ToggleWireframe,
    ToggleOrbit,
    CamResize { cols: ScreenSize, rows: ScreenSize },
    ResetView,
    Exit,
}

fn handle_event(event: CtEvent) -> io::Result<Option<Event>> {
    match event {
        CtEvent::Key(key_event) => match key_event {
            KeyEvent {
                code: KeyCode::Char('q'),
                ..
            }
            | KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } => Ok(Some(Event::Exit)),
            KeyEvent {
                code: KeyCode::Char('h') | KeyCode::Left,
                ..
            } => Ok(Some(Event::MoveLeft)),
            KeyEvent {
                code: KeyCode::Char('j') | KeyCode::Down,
                ..
            } => Ok(Some(Event::MoveDown)),
            KeyEvent {
                code: KeyCode::Char('k') | KeyCode::Up,
                ..
            } => Ok(Some(Event::MoveUp)),
            KeyEvent {
                code: KeyCode::Char('l') | KeyCode::Right,
                ..
            } => Ok(Some(Event::MoveRight)),
            KeyEvent {
                code: KeyCode::Char('+' | '='),
                ..
            } => Ok(Some(Event::SplitUp)),
            KeyEvent {
                code: KeyCode::Char('-'),
                ..
            } => Ok(Some(Event::SplitDown)),
            KeyEvent {
                code: KeyCode::Char(']'),
                ..
            } => Ok(Some(Event::DepthUp)),
            KeyEvent {
                code: KeyCode::Char('['),
                ..
            } => Ok(Some(Event::DepthDown)),
            KeyEvent {
                code: KeyCode::Char('w'),
                ..
            } => Ok(Some(Event::ToggleWireframe)),
            KeyEvent {
                code: KeyCode::Char(' '),
                ..
            } => Ok(Some(Event::ToggleOrbit)),
            KeyEvent {
                code: KeyCode::Char('0'),
                ..
            } => Ok(Some(Event::ResetView)),
            _ => Ok(None),
        },
        CtEvent::Resize(cols, rows) => Ok(Some(Event::CamResize { cols, rows })),
        _ => Ok(None),
    }
}

/// Everything the sliders and keys of the demo control.
struct Demo {
    config: LodConfig,
    initial: LodConfig,
    yaw: f64,
    pitch: f64,
    orbit: bool,
    wireframe: bool,
}

impl Demo {
    fn new(config: LodConfig) -> Self {
        Self {
            initial: config.clone(),
            config,
            yaw: 0.0,
            pitch: 0.3,
            orbit: true,
            wireframe: true,
        }
    }

    fn focus(&self) -> DVec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();

        DVec3::new(cp * cy, sp, cp * sy)
    }

    fn apply(&mut self, event: Event) {
        let (lo, hi) = SPLIT_FACTOR_RANGE;
        let limit = std::f64::consts::FRAC_PI_2 - TURN_STEP;

        match event {
            Event::MoveUp => self.pitch = (self.pitch + TURN_STEP).min(limit),
            Event::MoveDown => self.pitch = (self.pitch - TURN_STEP).max(-limit),
            Event::MoveLeft => self.yaw -= TURN_STEP,
            Event::MoveRight => self.yaw += TURN_STEP,
            Event::SplitUp => {
                self.config.split_factor = (self.config.split_factor + SPLIT_FACTOR_STEP).min(hi)
            }
            Event::SplitDown => {
                self.config.split_factor = (self.config.split_factor - SPLIT_FACTOR_STEP).max(lo)
            }
            Event::DepthUp => {
                self.config.max_depth = (self.config.max_depth + 1).min(TERMINAL_MAX_DEPTH)
            }
            Event::DepthDown => self.config.max_depth = self.config.max_depth.saturating_sub(1),
            Event::ToggleWireframe => self.wireframe = !self.wireframe,
            Event::ToggleOrbit => self.orbit = !self.orbit,
            Event::ResetView => *self = Self::new(self.initial.clone()),
            Event::CamResize { .. } | Event::Exit => {}
        }
    }
}

/// Pull depth and split factor into the ranges the keys step through.
fn fit_terminal(mut config: LodConfig) -> LodConfig {
    let (lo, hi) = SPLIT_FACTOR_RANGE;

    config.max_depth = config.max_depth.min(TERMINAL_MAX_DEPTH);
    config.split_factor = config.split_factor.clamp(lo, hi);
    config
}

fn camera_for(cols: ScreenSize, rows: ScreenSize) -> Camera {
    // leave one row for the status line
    let rows = rows.saturating_sub(1).max(1);

    Camera::new(2 * cols as usize, 4 * rows as usize)
}

fn draw(cam: &mut Camera, sphere: &CubeSphere, wireframe: bool) {
    let tile = (cam.width() / 4).min(cam.height() / 3) as i64;

    cam.reset();

    let mut leaves = LeafRenderer::new(cam).wireframe(wireframe);

    sphere.visit(&mut leaves, |r, face, tree| {
        r.renderer
            .set_viewport(Viewport::cube_cross(face, tree.bounds(), tile));
    });
}

fn run(mut demo: Demo) -> anyhow::Result<()> {
    let mut stdout = io::stdout();

    let (cols, rows) = terminal::size()?;
    let mut cam = camera_for(cols, rows);
    let start = Instant::now();
    let mut last = start;

    loop {
        let t = time::SystemTime::now();

        // Poll event for as long as FRAMETIME
        let (dt, event) = if event::poll(FRAMETIME)? {
            let event = event::read()?;

            let event = handle_event(event)?;
            let dt = t.elapsed()?;

            (dt, event)
        } else {
            (Duration::ZERO, None)
        };

        match event {
            None => {}
            Some(Event::Exit) => break,
            Some(Event::CamResize { cols, rows }) => {
                cam = camera_for(cols, rows);
            }
            Some(event) => demo.apply(event),
        }

        let now = Instant::now();
        if demo.orbit {
            demo.yaw += ORBIT_SPEED * (now - last).as_secs_f64();
        }
        last = now;

        let sphere = CubeSphere::build(&demo.config, demo.focus())?;
        draw(&mut cam, &sphere, demo.wireframe);
        let s = cam.render();

        execute!(
            stdout,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
        )?;

        for line in s.lines() {
            execute!(stdout, style::Print(line), cursor::MoveToNextLine(1))?;
        }

        execute!(
            stdout,
            style::Print(format!(
                "k={:.1} depth={} leaves={} {}",
                demo.config.split_factor,
                demo.config.max_depth,
                sphere.leaf_count(),
                if demo.orbit { "orbit" } else { "manual" },
            ))
        )?;

        let time_left = FRAMETIME.saturating_sub(dt);
        thread::sleep(time_left);
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(s) => s.parse::<LodConfig>().context("Invalid config string")?,
        None => LodConfig::default(),
    };
    let config = fit_terminal(config);

    info!(?config, "starting");

    terminal::enable_raw_mode()?;
    let res = run(Demo::new(config));
    terminal::disable_raw_mode()?;

    res
}
