use macroquad::prelude::*;

use nibgrid::config::Config;
use nibgrid::episode_log::{EpisodeLog, Event};
use nibgrid::viewer::Frame;
use nibgrid::GridWorld;

/// Map a screen point to the grid cell under it
fn screen_to_cell(mx: f32, my: f32, frame: &Frame, cols: i32, rows: i32) -> (i32, i32) {
    let cx = (mx / frame.pix_width).floor() as i32;
    let cy = (my / frame.pix_height).floor() as i32;
    (cx.clamp(0, cols - 1), cy.clamp(0, rows - 1))
}

#[macroquad::main("NibGrid - Ink Tracing")]
async fn main() {
    let config = Config::load();

    let mut world = match GridWorld::new(config.env.seed, config.env.cols, config.env.rows) {
        Ok(world) => world,
        Err(e) => {
            eprintln!("Failed to build environment: {}", e);
            std::process::exit(1);
        }
    };

    let mut log = EpisodeLog::new();
    log.log(Event::Reset {
        ink_remaining: world.grid.ink_count(),
    });

    println!(
        "NibGrid {}x{} (seed {})",
        world.width(),
        world.height(),
        config.env.seed
    );
    println!("Left-click: step nib to cell | R: reset | S: save log | Esc: quit");

    let background = Color::from_rgba(
        config.visual.background_r,
        config.visual.background_g,
        config.visual.background_b,
        255,
    );

    loop {
        clear_background(background);

        let obs = world.observe();
        let frame = Frame::project(
            &obs,
            world.width(),
            world.height(),
            screen_width(),
            screen_height(),
        );

        // Draw the pixel grid
        for y in 0..world.height() {
            for x in 0..world.width() {
                let shade = frame.shades[world.grid.get_id(x, y) as usize];
                let (ox, oy) = frame.cell_origin(x, y);
                draw_rectangle(
                    ox,
                    oy,
                    frame.pix_width,
                    frame.pix_height,
                    Color::new(shade, shade, shade, 1.0),
                );
            }
        }

        // Draw the nib
        draw_circle(frame.nib_x, frame.nib_y, config.visual.nib_radius, RED);

        // HUD
        let hud = format!(
            "reward: {:.1}  distance: {:.1}  ink left: {}",
            world.prev_reward,
            world.distance_tot,
            world.grid.ink_count()
        );
        draw_text(&hud, 10.0, 20.0, 24.0, GREEN);

        if is_mouse_button_pressed(MouseButton::Left) {
            let (mx, my) = mouse_position();
            let target = screen_to_cell(mx, my, &frame, world.width(), world.height());

            match world.step(target) {
                Ok((_, reward, _, _)) => {
                    let ink_remaining = world.grid.ink_count();
                    println!(
                        "step -> ({}, {}): reward {:.1}, total {:.1}, ink left {}",
                        target.0, target.1, reward, world.prev_reward, ink_remaining
                    );
                    log.log(Event::Step {
                        target_x: target.0,
                        target_y: target.1,
                        reward,
                        distance_tot: world.distance_tot,
                        ink_remaining,
                    });
                    // Episode cutoff is the driver's call; announce full erasure
                    if ink_remaining == 0 {
                        println!("Grid fully erased - press R for a fresh episode");
                    }
                }
                Err(e) => eprintln!("Rejected step: {}", e),
            }
        }

        if is_key_pressed(KeyCode::R) {
            world.reset();
            log.log(Event::Reset {
                ink_remaining: world.grid.ink_count(),
            });
            println!("Episode reset ({} ink pixels)", world.grid.ink_count());
        }

        if is_key_pressed(KeyCode::S) && config.logging.enable_episode_log {
            match log.save_to_file(&config.logging.episode_log_path) {
                Ok(()) => println!("Episode log saved to {}", config.logging.episode_log_path),
                Err(e) => eprintln!("Failed to save episode log: {}", e),
            }
        }

        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        next_frame().await
    }

    if config.logging.enable_episode_log {
        if let Err(e) = log.save_to_file(&config.logging.episode_log_path) {
            eprintln!("Failed to save episode log: {}", e);
        }
    }
    println!("{}", log.summary());
}
