use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result};

use sprig_engine::coords::{AffineMatrix, MatrixStack, Rect, Vec2};
use sprig_engine::input::PointerEvent;
use sprig_engine::scene::{HitPolicy, Scene, SceneConfig};
use sprig_engine::shapes::{BezierPath, Circle, ClipRegion, EndClip, Line, Polygon, Rectangle};
use sprig_engine::sprite::{RenderState, RenderType, Sprite};
use sprig_engine::surface::{DrawingSurface, RecordingSurface, SurfaceCmd};
use sprig_engine::SceneError;

// ── matrices ──────────────────────────────────────────────────────────────

#[test]
fn nested_transforms_compose_parent_first() -> Result<()> {
    let mut scene: Scene = Scene::new();
    let a = scene.add(Sprite::new(Circle::new(1.0), "A").at(10.0, 0.0))?;
    let b = scene.add_sprite(a, Sprite::new(Circle::new(1.0), "B").rotated(90.0).scaled(2.0, 1.0))?;

    let world = scene.world_matrix(b)?;
    let p = world.transform_point(Vec2::new(1.0, 0.0));
    assert!(p.approx_eq_eps(Vec2::new(10.0, 2.0), 1e-4), "got {p}");

    let round = AffineMatrix::multiply(&world, &scene.local_matrix(b)?);
    assert!(round.approx_eq_eps(&AffineMatrix::identity(), 1e-5));
    Ok(())
}

#[test]
fn matrix_stack_pop_on_fresh_stack_underflows() {
    let mut stack = MatrixStack::new();
    assert!(matches!(stack.pop_matrix(), Err(SceneError::StackUnderflow { .. })));
    assert_eq!(stack.depth(), 1);
}

// ── hit testing ───────────────────────────────────────────────────────────

#[test]
fn circle_and_rect_hits_through_the_scene() -> Result<()> {
    let mut scene: Scene = Scene::new();
    let circle = scene.add(Sprite::new(Circle::new(10.0), "circle").at(100.0, 100.0))?;
    let rect = scene.add(Sprite::new(Rectangle::centered(20.0, 10.0), "rect").at(0.0, 50.0).rotated(90.0))?;

    assert!(scene.hit_test(circle, Vec2::new(106.0, 108.0))?);
    assert!(!scene.hit_test(circle, Vec2::new(108.0, 108.0))?);

    // Rotated 90°: the 20-wide rect now spans 20 vertically.
    assert!(scene.hit_test(rect, Vec2::new(0.0, 59.0))?);
    assert!(!scene.hit_test(rect, Vec2::new(9.0, 50.0))?);

    scene.sprite_mut(circle).context("circle")?.set_visible(false);
    assert!(!scene.hit_test(circle, Vec2::new(100.0, 100.0))?);
    Ok(())
}

#[test]
fn open_and_polygon_shapes() -> Result<()> {
    let mut scene: Scene = Scene::new();
    let line = scene.add(Sprite::new(Line::new(Vec2::zero(), Vec2::new(100.0, 0.0)), "line").at(0.0, 200.0))?;
    let hex = scene.add(Sprite::new(Polygon::regular(6, 20.0), "hex").at(300.0, 300.0))?;
    let curve = scene.add(Sprite::new(
        BezierPath::quadratic(vec![Vec2::zero(), Vec2::new(50.0, 50.0), Vec2::new(100.0, 0.0)])?,
        "curve",
    ))?;

    assert!(scene.hit_test(line, Vec2::new(40.0, 201.5))?);
    assert!(!scene.hit_test(line, Vec2::new(40.0, 204.0))?);
    assert!(scene.hit_test(hex, Vec2::new(305.0, 302.0))?);
    assert!(!scene.hit_test(hex, Vec2::new(330.0, 300.0))?);
    assert!(!scene.hit_test(curve, Vec2::new(50.0, 25.0))?);
    Ok(())
}

// ── pointer routing ───────────────────────────────────────────────────────

fn stacked(policy: HitPolicy) -> Result<(Scene, Rc<RefCell<Vec<String>>>)> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut scene = Scene::with_config(SceneConfig::default().with_hit_policy(policy));
    for (name, x) in [("back", 0.0), ("front", 4.0)] {
        let id = scene.add(Sprite::new(Rectangle::centered(20.0, 20.0), name).at(x, 0.0))?;
        let log = log.clone();
        scene.sprite_mut(id).context("fresh sprite")?.on_pointer(move |s, ev| {
            log.borrow_mut().push(format!("{} {:?}", s.name, ev.kind));
            Ok(())
        });
    }
    Ok((scene, log))
}

#[test]
fn default_policy_notifies_every_hit() -> Result<()> {
    let (mut scene, log) = stacked(HitPolicy::default())?;
    let got = scene.dispatch_pointer_event(PointerEvent::down(2.0, 0.0))?;
    assert_eq!(got.len(), 2);
    assert_eq!(*log.borrow(), ["back Down", "front Down"]);
    Ok(())
}

#[test]
fn topmost_policy_notifies_front_only() -> Result<()> {
    let (mut scene, log) = stacked(HitPolicy::TopmostOnly)?;
    scene.dispatch_pointer_event(PointerEvent::down(2.0, 0.0))?;
    scene.dispatch_pointer_event(PointerEvent::drag(100.0, 100.0))?;
    scene.dispatch_pointer_event(PointerEvent::up(100.0, 100.0))?;
    assert_eq!(*log.borrow(), ["front Down", "front Drag", "front Up"]);
    Ok(())
}

#[test]
fn listener_error_propagates() -> Result<()> {
    let mut scene: Scene = Scene::new();
    let id = scene.add(Sprite::new(Circle::new(5.0), "angry"))?;
    scene
        .sprite_mut(id)
        .context("angry")?
        .on_pointer(|_, _| Err(SceneError::InvalidHierarchy("listener refused".into())));
    let err = scene.dispatch_pointer_event(PointerEvent::down(0.0, 0.0)).unwrap_err();
    assert!(matches!(err, SceneError::InvalidHierarchy(_)));
    Ok(())
}

// ── update / draw ─────────────────────────────────────────────────────────

#[test]
fn update_listener_can_move_its_sprite() -> Result<()> {
    let mut scene: Scene = Scene::new();
    let id = scene.add(Sprite::new(Circle::new(5.0), "mover"))?;
    scene.sprite_mut(id).context("mover")?.on_update(|s, ev| {
        s.transform.position.x += 100.0 * ev.interval_sec;
        Ok(())
    });
    // Pre and Post both run.
    scene.update(0.0, 0.5)?;
    let x = scene.sprite(id).context("mover")?.transform.position.x;
    assert!((x - 100.0).abs() < 1e-4);
    Ok(())
}

#[test]
fn draw_paints_by_render_type_and_stays_balanced() -> Result<()> {
    let mut scene: Scene = Scene::new();
    let stroke = RenderState { render_type: RenderType::Stroke, ..RenderState::default() };
    let custom = RenderState { render_type: RenderType::Custom, ..RenderState::default() };
    scene.add(Sprite::new(Circle::new(5.0), "filled"))?;
    scene.add(Sprite::new(Circle::new(5.0), "outlined").with_state(stroke))?;
    let id = scene.add(Sprite::new(Circle::new(5.0), "custom").with_state(custom))?;
    scene.sprite_mut(id).context("custom")?.on_render(|_, surface, _| {
        surface.rect(Rect::new(0.0, 0.0, 1.0, 1.0));
        Ok(())
    });

    let mut surface = RecordingSurface::new();
    scene.draw(&mut surface)?;

    assert_eq!(surface.count(|c| *c == SurfaceCmd::Fill), 1);
    assert_eq!(surface.count(|c| *c == SurfaceCmd::Stroke), 1);
    // Pre and Post render listeners.
    assert_eq!(surface.count(|c| matches!(c, SurfaceCmd::Rect(_))), 2);
    assert_eq!(surface.depth(), 0);
    assert_eq!(surface.unbalanced_restores(), 0);
    Ok(())
}

#[test]
fn clip_pair_wraps_the_sprites_between_them() -> Result<()> {
    let mut scene: Scene = Scene::new();
    scene.add(Sprite::new(ClipRegion::new(Circle::new(30.0)), "clip"))?;
    scene.add(Sprite::new(Rectangle::new(100.0, 100.0), "content"))?;
    scene.add(Sprite::new(EndClip, "end clip"))?;

    let mut surface = RecordingSurface::new();
    scene.draw(&mut surface)?;

    let cmds = surface.commands();
    let clip_at = cmds.iter().position(|c| *c == SurfaceCmd::Clip).context("clip")?;
    let rect_at = cmds.iter().position(|c| matches!(c, SurfaceCmd::Rect(_))).context("rect")?;
    let last_restore = cmds.iter().rposition(|c| *c == SurfaceCmd::Restore).context("restore")?;
    assert!(clip_at < rect_at && rect_at < last_restore);
    assert_eq!(surface.depth(), 0);
    Ok(())
}
