use float_cmp::approx_eq;

use svgrender::{Options, Pixel, Rect, RenderTree, Size, Transform};

mod utils;

use self::utils::{load_svg, write_fixture, FULL_SQUARE, SQUARE_AND_DOT};

const TRANSPARENT: Pixel = Pixel {
    r: 0,
    g: 0,
    b: 0,
    a: 0,
};

fn assert_rect_eq(actual: Rect, expected: Rect) {
    assert!(
        approx_eq!(f32, actual.x, expected.x, epsilon = 0.01)
            && approx_eq!(f32, actual.y, expected.y, epsilon = 0.01)
            && approx_eq!(f32, actual.width, expected.width, epsilon = 0.01)
            && approx_eq!(f32, actual.height, expected.height, epsilon = 0.01),
        "{:?} != {:?}",
        actual,
        expected
    );
}

#[test]
fn has_element_with_id_works() {
    let tree = load_svg(SQUARE_AND_DOT).unwrap();

    assert!(tree.has_element_with_id("square"));
    assert!(tree.has_element_with_id("#dot"));
    assert!(!tree.has_element_with_id("nonexistent"));
}

#[test]
fn natural_size_comes_from_the_document() {
    let tree = load_svg(SQUARE_AND_DOT).unwrap();

    assert!(!tree.is_empty());
    assert_eq!(tree.image_size(), Size::new(100.0, 50.0));
}

#[test]
fn viewbox_gives_the_natural_size() {
    let tree = load_svg(
        br#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 30 40">
  <rect width="30" height="40"/>
</svg>"#,
    )
    .unwrap();

    assert_eq!(tree.image_size(), Size::new(30.0, 40.0));
}

#[test]
fn object_bbox_excludes_stroke() {
    let tree = load_svg(SQUARE_AND_DOT).unwrap();

    assert_rect_eq(tree.object_bbox().unwrap(), Rect::new(0.0, 0.0, 85.0, 50.0));
}

#[test]
fn image_bbox_includes_stroke() {
    let tree = load_svg(SQUARE_AND_DOT).unwrap();

    let image = tree.image_bbox().unwrap();
    let object = tree.object_bbox().unwrap();

    assert_rect_eq(image, Rect::new(0.0, 0.0, 87.0, 50.0));
    assert!(image.contains(&object));
}

#[test]
fn node_bbox_is_in_document_coordinates() {
    let tree = load_svg(SQUARE_AND_DOT).unwrap();

    // A bare shape's box leaves out its stroke
    assert_rect_eq(tree.node_bbox("dot").unwrap(), Rect::new(65.0, 15.0, 20.0, 20.0));
    assert_rect_eq(tree.node_bbox("square").unwrap(), Rect::new(0.0, 0.0, 50.0, 50.0));
    assert_eq!(tree.node_bbox("nonexistent"), None);
}

#[test]
fn render_at_natural_size() {
    let image = svgrender::render(SQUARE_AND_DOT).unwrap();

    assert_eq!((image.width(), image.height()), (100, 50));
    assert_eq!(image.data().len(), 100 * 50 * 4);

    assert_eq!(image.pixel(25, 25), Some(Pixel::new(0, 0, 255, 255)));
    assert_eq!(image.pixel(75, 25), Some(Pixel::new(0, 255, 0, 255)));
    assert_eq!(image.pixel(99, 0), Some(TRANSPARENT));
}

#[test]
fn identity_transform_matches_natural_size_render() {
    let svg: &'static [u8] = br##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
  <rect x="10" y="10" width="60" height="30" fill="#336699" fill-opacity="0.6"/>
  <circle cx="60" cy="70" r="25" fill="none" stroke="#cc3300" stroke-width="5"/>
</svg>"##;

    let tree = load_svg(svg).unwrap();
    let by_tree = tree.render(&Transform::identity(), 100, 100).unwrap();
    let one_shot = svgrender::render(svg).unwrap();

    assert_eq!((one_shot.width(), one_shot.height()), (100, 100));
    assert_eq!(by_tree, one_shot);
}

#[test]
fn render_with_size_does_not_scale() {
    let image = svgrender::render_with_size(SQUARE_AND_DOT, 60, 60).unwrap();

    assert_eq!((image.width(), image.height()), (60, 60));

    // Same place as at the natural size
    assert_eq!(image.pixel(10, 10), Some(Pixel::new(0, 0, 255, 255)));

    // Below the document
    assert_eq!(image.pixel(10, 55), Some(TRANSPARENT));
}

#[test]
fn render_scaled_to_size_letterboxes() {
    let image = svgrender::render_scaled_to_size(FULL_SQUARE, 200, 100).unwrap();

    assert_eq!((image.width(), image.height()), (200, 100));

    let red = Some(Pixel::new(255, 0, 0, 255));

    assert_eq!(image.pixel(45, 50), Some(TRANSPARENT));
    assert_eq!(image.pixel(55, 0), red);
    assert_eq!(image.pixel(100, 50), red);
    assert_eq!(image.pixel(145, 99), red);
    assert_eq!(image.pixel(155, 50), Some(TRANSPARENT));
}

#[test]
fn render_with_transform() {
    let tree = load_svg(FULL_SQUARE).unwrap();

    let transform =
        Transform::from_translate(10.0, 0.0).pre_concat(&Transform::from_scale(0.5, 0.5));
    let image = tree.render(&transform, 50, 50).unwrap();

    assert_eq!(image.pixel(5, 5), Some(TRANSPARENT));
    assert_eq!(image.pixel(20, 20), Some(Pixel::new(255, 0, 0, 255)));
    assert_eq!(image.pixel(40, 40), Some(TRANSPARENT));
}

#[test]
fn render_node_draws_only_that_element() {
    let tree = load_svg(SQUARE_AND_DOT).unwrap();

    let image = tree.render_node("dot", &Transform::identity(), 20, 20).unwrap();

    assert_eq!(image.pixel(10, 10), Some(Pixel::new(0, 255, 0, 255)));
    assert_eq!(image.pixel(0, 0), Some(TRANSPARENT));

    let image = tree
        .render_node("#square", &Transform::from_scale(0.5, 0.5), 25, 25)
        .unwrap();

    assert!(image.pixels().iter().all(|p| *p == Pixel::new(0, 0, 255, 255)));
}

#[test]
fn render_into_reuses_a_buffer() {
    let tree = load_svg(FULL_SQUARE).unwrap();
    let mut buffer = vec![0u8; 50 * 50 * 4];

    for _ in 0..3 {
        tree.render_into(&Transform::identity(), 50, 50, &mut buffer)
            .unwrap();
        assert_eq!(&buffer[..4], &[255, 0, 0, 255]);
    }
}

#[test]
fn straight_alpha_output() {
    let image = svgrender::render(
        br##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="4">
  <rect width="4" height="4" fill="#8040c0" opacity="0.5"/>
</svg>"##,
    )
    .unwrap();

    let p = image.pixel(2, 2).unwrap();

    // Colors are not darkened by the alpha
    assert!(p.a > 120 && p.a < 135, "{:?}", p);
    assert!((p.r as i32 - 0x80).abs() <= 2, "{:?}", p);
    assert!((p.g as i32 - 0x40).abs() <= 2, "{:?}", p);
    assert!((p.b as i32 - 0xc0).abs() <= 2, "{:?}", p);
}

#[test]
fn load_from_path() {
    let (_dir, path) = write_fixture("square.svg", FULL_SQUARE);

    let tree = RenderTree::from_path(&path, &Options::new()).unwrap();
    assert_eq!(tree.image_size(), Size::new(50.0, 50.0));
}

#[test]
fn dpi_affects_physical_units() {
    let svg: &[u8] = br#"<svg xmlns="http://www.w3.org/2000/svg" width="1in" height="2in"/>"#;

    let mut options = Options::new();
    options.set_dpi(72.0);
    let tree = RenderTree::from_data(svg, &options).unwrap();
    assert_eq!(tree.image_size(), Size::new(72.0, 144.0));

    let tree = RenderTree::from_data(svg, &Options::new()).unwrap();
    assert_eq!(tree.image_size(), Size::new(96.0, 192.0));
}

#[test]
fn stylesheet_is_applied() {
    let svg: &[u8] = br#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
  <rect class="box" width="10" height="10" fill="red"/>
</svg>"#;

    let mut options = Options::new();
    options.set_stylesheet(".box { fill: #00ff00; }");

    let tree = RenderTree::from_data(svg, &options).unwrap();
    let image = tree.render(&Transform::identity(), 10, 10).unwrap();

    assert_eq!(image.pixel(5, 5), Some(Pixel::new(0, 255, 0, 255)));
}

#[test]
fn options_can_be_reused_after_parsing() {
    let mut options = Options::new();

    let first = RenderTree::from_data(FULL_SQUARE, &options).unwrap();
    options.set_dpi(300.0);
    let second = RenderTree::from_data(SQUARE_AND_DOT, &options).unwrap();

    options.release();

    assert_eq!(first.image_size(), Size::new(50.0, 50.0));
    assert!(second.render(&Transform::identity(), 100, 50).is_ok());
}

#[test]
fn write_png_round_trips_dimensions() {
    let image = svgrender::render(SQUARE_AND_DOT).unwrap();

    let mut png_data = Vec::new();
    image.write_png(&mut png_data).unwrap();

    let reader = png::Decoder::new(&png_data[..]).read_info().unwrap();
    assert_eq!(reader.info().width, 100);
    assert_eq!(reader.info().height, 50);
}
