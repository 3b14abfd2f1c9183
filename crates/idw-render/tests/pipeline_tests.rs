//! End-to-end tests over the render pipeline:
//! interpolate -> resolve -> stamp -> colorize.

use idw_common::{Color, ColorStop, GradientSpec, Sample};
use idw_render::colorize::colorize;
use idw_render::stamp::stamp_cells;
use idw_render::{CellGrid, GeoScale, GridDims, InterpolationParams, RasterBuffer, Stamp};

const WIDTH: u32 = 100;
const HEIGHT: u32 = 100;
const CELL: u32 = 25;

fn run_pass(
    samples: &[Sample],
    params: &InterpolationParams,
    opacity: f64,
) -> Vec<u8> {
    let mut grid = CellGrid::new();
    grid.reset(GridDims::for_viewport(WIDTH, HEIGHT, CELL));
    grid.accumulate(samples, params);
    let cells = grid.resolve(params.max);

    let mut buffer = RasterBuffer::new();
    buffer.prepare(WIDTH, HEIGHT);
    stamp_cells(&mut buffer, &cells, &Stamp::new(CELL), params.max);

    let lut = GradientSpec::default().build_lut().unwrap();
    colorize(buffer.pixels_mut(), &lut, opacity, params.range > 0.0);

    buffer.pixels().to_vec()
}

#[test]
fn test_empty_sample_set_unlimited_colorizes_background() {
    let params = InterpolationParams {
        exp: 2.0,
        range: 0.0,
        max: 1.0,
        geo_scale: None,
    };
    let pixels = run_pass(&[], &params, 0.5);

    // no density anywhere, but unlimited mode still colorizes through the
    // gradient's zero stop at the layer opacity
    let lut = GradientSpec::default().build_lut().unwrap();
    let [r0, g0, b0, _] = lut.get(0);
    for px in pixels.chunks_exact(4) {
        assert_eq!(px[0], r0);
        assert_eq!(px[1], g0);
        assert_eq!(px[2], b0);
        assert_eq!(px[3], 128);
    }
}

#[test]
fn test_empty_sample_set_range_limited_stays_transparent() {
    let params = InterpolationParams {
        exp: 2.0,
        range: 10.0,
        max: 1.0,
        geo_scale: Some(GeoScale {
            km_per_px_x: 1.0,
            km_per_px_y: 1.0,
        }),
    };
    let pixels = run_pass(&[], &params, 1.0);
    assert!(pixels.iter().all(|&b| b == 0), "all-transparent raster");
}

#[test]
fn test_out_of_range_pixels_survive_colorization_transparent() {
    // one sample in the top-left corner, tight radius: far corner pixels
    // must come out of the whole pipeline with alpha 0
    let params = InterpolationParams {
        exp: 2.0,
        range: 40.0,
        max: 1.0,
        geo_scale: Some(GeoScale {
            km_per_px_x: 1.0,
            km_per_px_y: 1.0,
        }),
    };
    let pixels = run_pass(&[Sample::new(12.5, 12.5, 1.0)], &params, 1.0);

    let alpha_at =
        |x: usize, y: usize| pixels[(y * WIDTH as usize + x) * 4 + 3];
    assert!(alpha_at(5, 5) > 0, "near the sample");
    assert_eq!(alpha_at(90, 90), 0, "beyond the effective range");
}

#[test]
fn test_identical_passes_produce_identical_rasters() {
    let samples = [
        Sample::new(20.0, 30.0, 0.8),
        Sample::new(70.0, 60.0, 0.3),
        Sample::new(40.0, 85.0, 0.6),
    ];
    let params = InterpolationParams {
        exp: 2.0,
        range: 0.0,
        max: 1.0,
        geo_scale: None,
    };

    let first = run_pass(&samples, &params, 0.7);
    let second = run_pass(&samples, &params, 0.7);
    assert_eq!(first, second);
}

#[test]
fn test_black_white_gradient_scenario() {
    // spec scenario: {0: black, 1: white}, opacity 1
    let spec = GradientSpec::new(vec![
        ColorStop::new(0.0, Color::Named("black".to_string())),
        ColorStop::new(1.0, Color::Named("white".to_string())),
    ]);
    let lut = spec.build_lut().unwrap();

    let mut grid = CellGrid::new();
    grid.reset(GridDims::for_viewport(WIDTH, HEIGHT, CELL));
    grid.accumulate(
        &[Sample::new(12.5, 12.5, 1.0)],
        &InterpolationParams {
            exp: 2.0,
            range: 0.0,
            max: 1.0,
            geo_scale: None,
        },
    );
    let cells = grid.resolve(1.0);

    let mut buffer = RasterBuffer::new();
    buffer.prepare(WIDTH, HEIGHT);
    stamp_cells(&mut buffer, &cells, &Stamp::new(CELL), 1.0);
    colorize(buffer.pixels_mut(), &lut, 1.0, false);

    // single sample -> every cell resolves to 1.0 -> density byte 255
    let px = &buffer.pixels()[(10 * WIDTH as usize + 10) * 4..][..4];
    assert_eq!(px, &[255, 255, 255, 255], "full density colorizes to white");
}
