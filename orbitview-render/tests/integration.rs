use orbitview_core::{CameraSnapshot, Complex, Fractal, FractalParams, Julia, Mandelbrot};
use orbitview_render::{render, ColorMap, FrameBuffer, RenderConfig};

fn snapshot(width: u32, height: u32, zoom: f64) -> CameraSnapshot {
    CameraSnapshot {
        zoom,
        offset_x: 0.0,
        offset_y: 0.0,
        width,
        height,
    }
}

#[test]
fn end_to_end_small_canvas_scenario() {
    // 100×100 canvas, budget 50. Zoom 20 puts the corners outside |c| = 2,
    // so they escape within a couple of steps while the center stays bounded.
    let params = FractalParams::new(50).unwrap();
    let fractal = Mandelbrot::new(params);
    let colors = ColorMap::hsb_default(50);
    let snap = snapshot(100, 100, 20.0);

    let mut frame = FrameBuffer::new(100, 100);
    render(&fractal, &snap, &colors, &RenderConfig::default(), &mut frame).unwrap();

    // Center pixel maps to c = 0: bounded, colored with the reserved entry.
    let center_point = snap.pixel_to_complex(50, 50);
    assert_eq!(center_point, Complex::ZERO);
    assert_eq!(fractal.iterate(center_point), 50);
    assert_eq!(frame.pixel(50, 50), colors.color(50));
    assert_eq!(frame.pixel(50, 50), [0, 0, 0, 255]);

    // Corner pixel maps to c = -2.5 - 2.5i: escapes within a few steps and
    // the frame holds exactly the HSB entry for its count.
    let corner_point = snap.pixel_to_complex(0, 0);
    assert!(corner_point.norm() > 2.0);
    let corner_count = fractal.iterate(corner_point);
    assert!(corner_count >= 48, "|c| > 2 escapes within a couple of steps");
    assert_eq!(frame.pixel(0, 0), colors.color(corner_count));
}

#[test]
fn center_pixel_is_black_at_reference_zoom() {
    // Same 100×100 canvas at the default zoom of 200: the view spans only
    // |re|, |im| ≤ 0.25, all inside the set, so every pixel gets the
    // bounded entry — in particular the center, c = 0.
    let fractal = Mandelbrot::new(FractalParams::new(50).unwrap());
    let colors = ColorMap::hsb_default(50);
    let snap = snapshot(100, 100, 200.0);

    let mut frame = FrameBuffer::new(100, 100);
    render(&fractal, &snap, &colors, &RenderConfig::default(), &mut frame).unwrap();

    assert_eq!(frame.pixel(50, 50), colors.color(50));
    assert_eq!(frame.pixel(50, 50), [0, 0, 0, 255]);
    assert!(
        frame.pixels.chunks_exact(4).all(|px| px == [0, 0, 0, 255]),
        "a quarter-unit window around the origin is entirely interior"
    );
}

#[test]
fn full_frame_mandelbrot_render() {
    let fractal = Mandelbrot::new(FractalParams::new(256).unwrap());
    let colors = ColorMap::hsb_default(256);
    let snap = snapshot(200, 150, 60.0);

    let mut frame = FrameBuffer::new(200, 150);
    let stats = render(&fractal, &snap, &colors, &RenderConfig::default(), &mut frame).unwrap();

    assert!(stats.leaf_tiles > 1, "30k pixels exceed the 8k threshold");
    assert!(stats.elapsed.as_nanos() > 0);

    // The view spans the set boundary, so both classifications must appear.
    let black = [0, 0, 0, 255];
    let has_black = frame.pixels.chunks_exact(4).any(|px| px == black);
    let has_color = frame.pixels.chunks_exact(4).any(|px| px != black);
    assert!(has_black, "bounded region should be visible");
    assert!(has_color, "escaping region should be visible");
}

#[test]
fn full_frame_julia_render() {
    let fractal = Julia::default();
    let colors = ColorMap::hsb_default(fractal.params().max_iterations);
    let snap = snapshot(160, 160, 50.0);

    let mut frame = FrameBuffer::new(160, 160);
    render(&fractal, &snap, &colors, &RenderConfig::default(), &mut frame).unwrap();

    let black = [0, 0, 0, 255];
    assert!(
        frame.pixels.chunks_exact(4).any(|px| px != black),
        "the default Julia view must not be entirely black"
    );
}

#[test]
fn render_is_deterministic_across_thread_schedules() {
    let fractal = Mandelbrot::default();
    let colors = ColorMap::hsb_default(1000);
    let snap = snapshot(128, 96, 40.0);
    let config = RenderConfig { tile_threshold: 300 };

    let mut frame1 = FrameBuffer::new(128, 96);
    let mut frame2 = FrameBuffer::new(128, 96);
    render(&fractal, &snap, &colors, &config, &mut frame1).unwrap();
    render(&fractal, &snap, &colors, &config, &mut frame2).unwrap();

    assert_eq!(frame1.pixels, frame2.pixels, "renders must be deterministic");
}

#[test]
fn offset_shifts_the_view() {
    let fractal = Mandelbrot::new(FractalParams::new(128).unwrap());
    let colors = ColorMap::hsb_default(128);

    let centered = snapshot(80, 80, 25.0);
    let mut panned = centered;
    panned.offset_x = -0.75;

    let mut frame_a = FrameBuffer::new(80, 80);
    let mut frame_b = FrameBuffer::new(80, 80);
    render(&fractal, &centered, &colors, &RenderConfig::default(), &mut frame_a).unwrap();
    render(&fractal, &panned, &colors, &RenderConfig::default(), &mut frame_b).unwrap();

    assert_ne!(frame_a.pixels, frame_b.pixels, "panning must change the image");
}
