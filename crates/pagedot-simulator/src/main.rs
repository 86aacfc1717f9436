//! Desktop simulator for the pagedot-rs page indicator widget.
//!
//! Renders a paged "app" in an SDL2 window via `embedded-graphics-simulator`:
//! each page is a colored panel, with a [`PageControl`] docked at the bottom.
//! Mouse clicks are forwarded as touch events.
//!
//! # Key bindings
//!
//! | Key    | Action                                  |
//! |--------|-----------------------------------------|
//! | ←/→   | Select previous / next page directly     |
//! | [ / ]  | Scroll one page and sync from the offset |
//! | D      | Toggle deferred current-page display     |
//! | Enter  | Commit a deferred page change            |
//! | Q      | Quit                                     |

use std::time::Duration;

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment as TextAlignment, Text};
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{debug, info};

use pagedot_core::{
    Bitmap, ControlEvent, Drawable, PageControl, ScrollRegion, ScrollTarget, Touchable,
    TouchEvent, TouchPoint, TouchResult,
};

/// Display size in pixels.
const DISPLAY_WIDTH: u32 = 320;
const DISPLAY_HEIGHT: u32 = 240;

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Height of the indicator strip at the bottom of the screen.
const CONTROL_HEIGHT: u32 = 40;

/// The demo pages: name and panel color.
const PAGES: &[(&str, Rgb565)] = &[
    ("Intro", Rgb565::new(4, 12, 12)),
    ("Charts", Rgb565::new(12, 8, 4)),
    ("Gallery", Rgb565::new(4, 16, 6)),
    ("Settings", Rgb565::new(10, 6, 14)),
];

/// A 9x9 diamond used as a mask source for the "Gallery" page.
fn diamond_bitmap() -> Bitmap {
    let side = 9u32;
    let mut bitmap = Bitmap::solid(Size::new(side, side), Rgb565::WHITE);
    let center = side as i32 / 2;
    for y in 0..side {
        for x in 0..side {
            let distance = (x as i32 - center).abs() + (y as i32 - center).abs();
            bitmap.set_covered(x, y, distance <= center);
        }
    }
    bitmap
}

fn draw_page<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    page: usize,
) -> Result<(), D::Error> {
    let (name, color) = PAGES[page];

    Rectangle::new(Point::zero(), Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT))
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(display)?;

    let style = MonoTextStyle::new(&FONT_10X20, Rgb565::WHITE);
    Text::with_alignment(
        name,
        Point::new(DISPLAY_WIDTH as i32 / 2, DISPLAY_HEIGHT as i32 / 2),
        style,
        TextAlignment::Center,
    )
    .draw(display)?;

    Ok(())
}

fn main() -> Result<(), core::convert::Infallible> {
    env_logger::init();

    let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("pagedot simulator", &output_settings);

    let control_bounds = Rectangle::new(
        Point::new(0, (DISPLAY_HEIGHT - CONTROL_HEIGHT) as i32),
        Size::new(DISPLAY_WIDTH, CONTROL_HEIGHT),
    );
    let mut control = PageControl::new(control_bounds);
    control.set_page_count(PAGES.len());
    for (index, &(name, _)) in PAGES.iter().enumerate() {
        control.set_name_for_page(Some(name), index);
    }
    control.set_image_mask_for_page(Some(diamond_bitmap()), 2);

    // Paged content the control keeps in sync with.
    let mut scroll = ScrollRegion::new(DISPLAY_WIDTH);

    info!(
        "starting simulator with {} pages, control bounds {:?}",
        PAGES.len(),
        control.bounds()
    );

    'running: loop {
        if control.is_dirty() {
            let page = control.displayed_page().unwrap_or(0);
            draw_page(&mut display, page)?;
            control.draw(&mut display)?;
            control.mark_clean();
            debug!("frame drawn, value: {}", control.accessibility_value());
        }
        window.update(&display);

        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, .. } => match keycode {
                    Keycode::Q => break 'running,
                    Keycode::Left => {
                        let current = control.current_page().unwrap_or(0) as i32;
                        control.set_current_page(current - 1);
                        control.sync_scroll_to_current_page(&mut scroll);
                    }
                    Keycode::Right => {
                        let current = control.current_page().unwrap_or(0) as i32;
                        control.set_current_page(current + 1);
                        control.sync_scroll_to_current_page(&mut scroll);
                    }
                    Keycode::LeftBracket | Keycode::RightBracket => {
                        let step = if keycode == Keycode::LeftBracket {
                            -(DISPLAY_WIDTH as i32)
                        } else {
                            DISPLAY_WIDTH as i32
                        };
                        let mut offset = scroll.content_offset();
                        offset.x = (offset.x + step)
                            .clamp(0, (PAGES.len() as i32 - 1) * DISPLAY_WIDTH as i32);
                        scroll.set_content_offset(offset);
                        control.update_page_for_scroll(&scroll);
                        control.update_current_page_display();
                        info!("scrolled to offset {}, page {:?}", offset.x, control.current_page());
                    }
                    Keycode::D => {
                        let defers = !control.defers_current_page_display();
                        control.set_defers_current_page_display(defers);
                        info!("defers_current_page_display = {}", defers);
                    }
                    Keycode::Return => {
                        control.update_current_page_display();
                        info!("committed deferred page change");
                    }
                    _ => {}
                },
                SimulatorEvent::MouseButtonDown { point, .. } => {
                    control.handle_touch(TouchEvent::Press(to_touch_point(point)));
                }
                SimulatorEvent::MouseButtonUp { point, .. } => {
                    let result = control.handle_touch(TouchEvent::Release(to_touch_point(point)));
                    if let TouchResult::Event(ControlEvent::ValueChanged { page }) = result {
                        info!("page changed to {} ({})", page, control.accessibility_value());
                        control.sync_scroll_to_current_page(&mut scroll);
                    }
                }
                _ => {}
            }
        }

        std::thread::sleep(FRAME_DURATION);
    }

    Ok(())
}

fn to_touch_point(point: Point) -> TouchPoint {
    TouchPoint::new(point.x.max(0) as u16, point.y.max(0) as u16)
}
