/// rast3d Terminal Demo - Rotating Triangle
///
/// Renders the demo triangle through the model/view/projection pipeline.
/// Controls:
///   - A/D: Rotate by +/-10 degrees
///   - X/Y/Z: Choose the rotation axis
///   - Q/ESC: Quit
///
/// `rast3d-terminal -r <angle>` renders a single frame to stdout and exits.

use std::env;
use std::io::stdout;
use std::process::ExitCode;

use rast3d_core::{Camera, Mesh, RotationState};
use rast3d_terminal::{render_frame, AppError, AsciiRenderer, TerminalApp};

/// Cell size of the one-shot image
const ONE_SHOT_SIZE: (usize, usize) = (70, 35);

fn parse_angle(args: &[String]) -> Result<Option<f32>, AppError> {
    match args {
        [] => Ok(None),
        [flag, angle] if flag == "-r" => angle
            .parse()
            .map(Some)
            .map_err(|e| AppError::Usage(format!("Invalid angle '{}': {}", angle, e))),
        _ => Err(AppError::Usage(
            "Usage: rast3d-terminal [-r <angle>]".to_string(),
        )),
    }
}

fn render_once(angle: f32) -> Result<(), AppError> {
    let (width, height) = ONE_SHOT_SIZE;
    let mut renderer = AsciiRenderer::new(width, height);

    render_frame(
        &mut renderer,
        &Mesh::demo_triangle(),
        &RotationState::new(angle),
        &Camera::default(),
    )?;

    renderer.write_plain(&mut stdout())?;
    Ok(())
}

fn run_interactive() -> Result<(), AppError> {
    println!("rast3d Terminal Renderer - Loading...");

    let mut app = TerminalApp::new(Mesh::demo_triangle(), RotationState::default())?;
    app.run()?;

    println!("Thank you for using rast3d!");
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let result = parse_angle(&args).and_then(|angle| match angle {
        Some(angle) => render_once(angle),
        None => run_interactive(),
    });

    // Frame and usage errors are reported here only
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_angle() {
        assert!(matches!(parse_angle(&args(&[])), Ok(None)));
        assert!(matches!(parse_angle(&args(&["-r", "-20"])), Ok(Some(a)) if a == -20.0));
        assert!(matches!(
            parse_angle(&args(&["-r", "abc"])),
            Err(AppError::Usage(_))
        ));
        assert!(matches!(
            parse_angle(&args(&["--spin"])),
            Err(AppError::Usage(_))
        ));
    }
}
