/// Terminal driver for the rast3d transformation pipeline
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use nalgebra::Vector3;
use rast3d_core::{Camera, Mesh, RotationState, TransformError, ROTATION_STEP_DEGREES};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use thiserror::Error;

pub mod renderer;

pub use renderer::AsciiRenderer;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to build frame matrices: {0}")]
    Transform(#[from] TransformError),

    #[error("{0}")]
    Usage(String),
}

/// Largest square viewport (in screen space) that fits the terminal.
///
/// Terminal cells are roughly twice as tall as wide, so a square image is
/// twice as many columns as rows. One row is reserved for the status line.
pub fn viewport_size(columns: u16, rows: u16) -> (usize, usize) {
    let height = rows.saturating_sub(1) as usize;
    let width = (columns as usize).min(height * 2);
    (width, width / 2)
}

/// Set up the renderer matrices for one frame and rasterize the mesh
pub fn render_frame(
    renderer: &mut AsciiRenderer,
    mesh: &Mesh,
    rotation: &RotationState,
    camera: &Camera,
) -> Result<(), TransformError> {
    renderer.clear();

    renderer.set_model(rotation.model_matrix()?);
    renderer.set_view(camera.view_matrix());
    renderer.set_projection(camera.projection_matrix()?);

    renderer.draw(mesh);
    Ok(())
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    mesh: Mesh,
    rotation: RotationState,
    camera: Camera,
    renderer: AsciiRenderer,
    running: bool,
    frame_count: u64,
}

impl TerminalApp {
    pub fn new(mesh: Mesh, rotation: RotationState) -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        let (width, height) = viewport_size(columns, rows);

        Ok(Self {
            mesh,
            rotation,
            camera: Camera::default(),
            renderer: AsciiRenderer::new(width, height),
            running: true,
            frame_count: 0,
        })
    }

    pub fn run(&mut self) -> Result<(), AppError> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> Result<(), AppError> {
        let target_frame_time = Duration::from_millis(10);

        log::info!(
            "Starting render loop at {}° ({}x{} cells)",
            self.rotation.angle,
            self.renderer.width(),
            self.renderer.height()
        );

        while self.running {
            let frame_start = Instant::now();

            self.render()?;
            log::debug!("frame count: {}", self.frame_count);
            self.frame_count += 1;

            // Wait for input for the rest of the frame
            let elapsed = frame_start.elapsed();
            let timeout = target_frame_time.saturating_sub(elapsed);
            if event::poll(timeout)? {
                self.handle_input()?;
            }
        }

        log::info!("Render loop stopped after {} frames", self.frame_count);
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char('a') => {
                    self.rotation.rotate(ROTATION_STEP_DEGREES);
                }
                KeyCode::Char('d') => {
                    self.rotation.rotate(-ROTATION_STEP_DEGREES);
                }
                KeyCode::Char('x') => self.select_axis(Vector3::x()),
                KeyCode::Char('y') => self.select_axis(Vector3::y()),
                KeyCode::Char('z') => self.select_axis(Vector3::z()),
                _ => {}
            }
            log::debug!(
                "Key {:?}: angle {}°, axis {:?}",
                code,
                self.rotation.angle,
                self.rotation.axis()
            );
        }
        Ok(())
    }

    fn select_axis(&mut self, axis: Vector3<f32>) {
        if let Err(e) = self.rotation.set_axis(axis) {
            log::warn!("Ignoring axis change: {}", e);
        }
    }

    fn render(&mut self) -> Result<(), AppError> {
        render_frame(&mut self.renderer, &self.mesh, &self.rotation, &self.camera)?;

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        // Draw status line above the image
        let axis = self.rotation.axis();
        queue!(
            stdout,
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "rast3d | angle: {:.0}° axis: ({:.0}, {:.0}, {:.0}) | a/d=Rotate x/y/z=Axis q=Quit\r\n",
                self.rotation.angle, axis.x, axis.y, axis.z
            )),
            ResetColor
        )?;

        self.renderer.write_to(&mut stdout)?;

        stdout.flush()?;
        Ok(())
    }
}
