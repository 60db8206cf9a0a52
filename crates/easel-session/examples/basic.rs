//! Example: Scripted drawing session exported to PNG

use easel_session::{Color, EXPORT_FILE_NAME, Key, Modifiers, Session, SessionConfig, Tool};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut session = Session::new(SessionConfig::with_viewport(320, 240));
    println!("Easel v{} ready", easel_session::VERSION);

    // Background sweep on the first layer
    session.set_brush_size(24);
    session.set_color_hex("#3F51B5")?;
    session.pointer_down(10.0, 200.0)?;
    for i in 1..=30 {
        let x = 10.0 + i as f32 * 10.0;
        let y = 200.0 - (i as f32 * 0.2).sin() * 80.0;
        session.pointer_move(x, y)?;
    }
    session.pointer_up(310.0, 120.0)?;

    // Shapes on a second layer
    session.add_layer();
    session.set_brush_size(4);
    session.set_tool(Tool::Rectangle);
    session.set_color(Color::RED);
    session.pointer_down(40.0, 30.0)?;
    session.pointer_move(140.0, 110.0)?;
    session.pointer_up(140.0, 110.0)?;

    session.set_tool(Tool::Circle);
    session.set_color(Color::GREEN);
    session.pointer_down(230.0, 70.0)?;
    session.pointer_up(270.0, 70.0)?;

    // Punch a hole through the rectangle, then take it back
    session.set_tool(Tool::Eraser);
    session.set_brush_size(20);
    session.pointer_down(90.0, 70.0)?;
    session.pointer_up(90.0, 70.0)?;
    session.handle_key(Key::Char('z'), Modifiers::CTRL)?;

    let status = session.history_status();
    println!(
        "{} layers, {} history entries, undo: {}, redo: {}",
        session.layers().len(),
        session.history().len(),
        status.can_undo,
        status.can_redo
    );

    let image = session.export_image()?;
    std::fs::write(EXPORT_FILE_NAME, &image.png)?;
    println!("Wrote {}x{} image to {}", image.width, image.height, EXPORT_FILE_NAME);

    Ok(())
}
