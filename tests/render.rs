use arto::draw::{BLUE, ObjectRole, RED, Scene, Shape, StrokeStyle, WHITE, create_object};
use arto::export::rasterize_surface;
use arto::symmetry::{self, SymmetryMode};
use cairo::{Context, ImageSurface};

fn pixel(surface: &mut ImageSurface, x: usize, y: usize) -> [u8; 4] {
    let stride = surface.stride() as usize;
    let data = surface.data().unwrap();
    let offset = y * stride + x * 4;
    [
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ]
}

fn render_live(scene: &Scene) -> ImageSurface {
    let surface =
        ImageSurface::create(cairo::Format::ARgb32, scene.width() as i32, scene.height() as i32)
            .unwrap();
    {
        let ctx = Context::new(&surface).unwrap();
        arto::draw::render_scene(&ctx, scene).unwrap();
    }
    surface
}

#[test]
fn guides_are_visible_live_but_not_exported() {
    let mut scene = Scene::new(100, 100, WHITE);
    symmetry::apply_guides(&mut scene, SymmetryMode::Horizontal, &StrokeStyle::outline(BLUE, 2.0));

    let mut live = render_live(&scene);
    // Cairo stores ARGB32 as native-endian u32: BGRA on little-endian hosts.
    assert_eq!(pixel(&mut live, 20, 50), [255, 0, 0, 255]);

    let mut exported = rasterize_surface(&mut scene).unwrap();
    assert_eq!(pixel(&mut exported, 20, 50), [255, 255, 255, 255]);

    // Guides come back after export.
    assert!(scene.objects().iter().all(|obj| obj.visible));
}

#[test]
fn mirrored_clone_renders_on_opposite_side() {
    let mut scene = Scene::new(100, 100, WHITE);
    let square = Shape::Rect {
        left: 10.0,
        top: 10.0,
        width: 20.0,
        height: 20.0,
    };
    let style = StrokeStyle::shape(RED, 1.0, true);
    for shape in std::iter::once(square.clone())
        .chain(symmetry::mirror(&square, SymmetryMode::Vertical, 100, 100))
    {
        scene.add_object(create_object(shape, style.clone(), ObjectRole::Content));
    }

    let mut surface = render_live(&scene);
    assert_eq!(pixel(&mut surface, 20, 20), [0, 0, 255, 255]);
    assert_eq!(pixel(&mut surface, 80, 20), [0, 0, 255, 255]);
    assert_eq!(pixel(&mut surface, 80, 80), [255, 255, 255, 255]);
}
