use crate::coords::{AffineMatrix, MatrixStack, Vec2};
use crate::error::{Result, SceneError};
use crate::input::{KeyEvent, PointerEvent, PointerEventKind, SceneEvent};
use crate::shapes::{DrawFrame, Group, ShapeKind};
use crate::sprite::{Order, RenderStateStack, Sprite, Transformable, UpdateEvent};
use crate::surface::DrawingSurface;
use crate::tree::{NodeId, Tree};

use super::{HitPolicy, SceneConfig};

/// Local-to-world matrix of `id`: `M_root * ... * M_parent * M_id`.
///
/// O(depth), uncached. Passes that need many world matrices per frame should
/// accumulate them on a [`MatrixStack`] instead, as [`Scene::draw`] does.
pub fn world_matrix_in<T: Transformable>(tree: &Tree<T>, id: NodeId) -> Result<AffineMatrix> {
    let node = tree.get(id).ok_or(SceneError::UnknownNode(id))?;
    let mut world = node.node_matrix();
    for ancestor in tree.ancestors(id) {
        if let Some(payload) = tree.get(ancestor) {
            world = payload.node_matrix() * world;
        }
    }
    Ok(world)
}

/// World-to-local matrix of `id`; fails with [`SceneError::SingularMatrix`].
pub fn local_matrix_in<T: Transformable>(tree: &Tree<T>, id: NodeId) -> Result<AffineMatrix> {
    world_matrix_in(tree, id)?.inverse()
}

/// Sprite tree plus the update, draw and input passes over it.
///
/// The root is a [`Group`] sprite named `"root"`. Only sprites reachable from
/// the root take part in the passes; detached subtrees stay alive until they
/// are re-attached or removed.
#[derive(Debug)]
pub struct Scene<D = ()> {
    tree: Tree<Sprite<D>>,
    root: NodeId,
    config: SceneConfig,
    /// Sprites hit by the last pointer `Down`; they keep receiving `Drag` and
    /// `Up` until the button is released.
    captured: Vec<NodeId>,
}

impl<D: Default> Default for Scene<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Default> Scene<D> {
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    pub fn with_config(config: SceneConfig) -> Self {
        let mut tree = Tree::new();
        let root = tree.insert(Sprite::new(Group, "root"));
        Self { tree, root, config, captured: Vec::new() }
    }
}

impl<D> Scene<D> {
    // ── container API ─────────────────────────────────────────────────────

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    #[inline]
    pub fn config_mut(&mut self) -> &mut SceneConfig {
        &mut self.config
    }

    /// Read-only view of the underlying tree.
    #[inline]
    pub fn tree(&self) -> &Tree<Sprite<D>> {
        &self.tree
    }

    /// Number of live sprites, root and detached ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Inserts `sprite` as the last child of `parent`.
    pub fn add_sprite(&mut self, parent: NodeId, sprite: Sprite<D>) -> Result<NodeId> {
        self.tree.insert_child(parent, sprite)
    }

    /// Inserts `sprite` under the root.
    pub fn add(&mut self, sprite: Sprite<D>) -> Result<NodeId> {
        self.add_sprite(self.root, sprite)
    }

    /// Moves an existing sprite (attached or detached) under `parent`.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if child == self.root {
            return Err(SceneError::InvalidHierarchy("the scene root cannot be reparented".into()));
        }
        self.tree.add_child(parent, child)
    }

    /// Unlinks `child` from its parent; it stays alive, detached.
    pub fn detach(&mut self, child: NodeId) -> Result<()> {
        self.tree.detach(child)
    }

    /// Removes a direct child of `parent` and its subtree; returns the sprite.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<Sprite<D>> {
        let sprite = self.tree.remove_child(parent, child)?;
        self.forget_dead();
        Ok(sprite)
    }

    /// See [`Tree::remove_all`].
    pub fn remove_all(&mut self, parent: NodeId, recursive: bool) -> Result<Vec<NodeId>> {
        let detached = self.tree.remove_all(parent, recursive)?;
        self.forget_dead();
        Ok(detached)
    }

    pub fn sprite(&self, id: NodeId) -> Option<&Sprite<D>> {
        self.tree.get(id)
    }

    pub fn sprite_mut(&mut self, id: NodeId) -> Option<&mut Sprite<D>> {
        self.tree.get_mut(id)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.tree.parent(id)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.tree.children(id)
    }

    /// First sprite named `name` in pre-order from the root.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.tree
            .pre_order_ids(self.root)
            .into_iter()
            .find(|&id| self.tree.get(id).is_some_and(|s| s.name == name))
    }

    /// Sprites currently holding pointer capture.
    pub fn captured(&self) -> &[NodeId] {
        &self.captured
    }

    fn forget_dead(&mut self) {
        let tree = &self.tree;
        self.captured.retain(|&id| tree.contains(id));
    }

    // ── node matrices ─────────────────────────────────────────────────────

    pub fn world_matrix(&self, id: NodeId) -> Result<AffineMatrix> {
        world_matrix_in(&self.tree, id)
    }

    pub fn local_matrix(&self, id: NodeId) -> Result<AffineMatrix> {
        local_matrix_in(&self.tree, id)
    }

    /// Maps a world (canvas) point into `id`'s local space.
    pub fn to_local(&self, id: NodeId, world_pt: Vec2) -> Result<Vec2> {
        Ok(self.local_matrix(id)?.transform_point(world_pt))
    }

    /// Hit test of a world point. Invisible sprites return `false` before any
    /// matrix work.
    pub fn hit_test(&self, id: NodeId, world_pt: Vec2) -> Result<bool> {
        let sprite = self.tree.get(id).ok_or(SceneError::UnknownNode(id))?;
        if !sprite.is_visible() {
            return Ok(false);
        }
        let local = self.to_local(id, world_pt)?;
        Ok(sprite.hit_test_local(local))
    }

    // ── update ────────────────────────────────────────────────────────────

    /// Runs update listeners depth-first: each sprite gets `Pre` before its
    /// children and `Post` after them. Stops at the first listener error.
    ///
    /// Iterative, so tree depth is not limited by the call stack. Children are
    /// read after the parent's `Pre` listeners have run.
    pub fn update(&mut self, elapsed_msec: f64, interval_sec: f32) -> Result<()> {
        let mut work = vec![(self.root, Order::Pre)];
        while let Some((id, order)) = work.pop() {
            let Some(sprite) = self.tree.get_mut(id) else { continue };
            sprite.update(&UpdateEvent { elapsed_msec, interval_sec, order })?;
            if order == Order::Pre {
                work.push((id, Order::Post));
                work.extend(self.tree.children(id).iter().rev().map(|&c| (c, Order::Pre)));
            }
        }
        Ok(())
    }

    // ── draw ──────────────────────────────────────────────────────────────

    /// Draws every visible sprite in tree order, parents before children.
    ///
    /// Visibility is per sprite: children of an invisible sprite still draw.
    /// World matrices accumulate on a matrix stack and render states on a
    /// render state stack, both created for this call. The first listener
    /// error aborts the pass.
    ///
    /// On every exit path the stacks are unwound and any clip still open on
    /// the surface (a [`ClipRegion`](crate::shapes::ClipRegion) whose
    /// [`EndClip`](crate::shapes::EndClip) never ran) is restored.
    pub fn draw(&mut self, surface: &mut dyn DrawingSurface) -> Result<()> {
        let mut pass = DrawPass::new(self.root);
        let res = pass.run(&mut self.tree, surface);
        pass.finish(surface);
        res
    }

    // ── input ─────────────────────────────────────────────────────────────

    /// Routes a scene event to the matching dispatcher.
    pub fn dispatch(&mut self, ev: SceneEvent) -> Result<Vec<NodeId>> {
        match ev {
            SceneEvent::Pointer(p) => self.dispatch_pointer_event(p),
            SceneEvent::Key(k) => self.dispatch_key_event(&k),
        }
    }

    /// Delivers a pointer event to the sprites it concerns and returns their
    /// ids in delivery order.
    ///
    /// `viewport_pos` is mapped to canvas space with the configured
    /// [`ViewportMapping`](crate::coords::ViewportMapping); each receiver sees
    /// the point in its own local space in `local_pos`.
    ///
    /// Receivers: the sprites hit under the configured [`HitPolicy`]. A `Down`
    /// captures its hits; `Drag` and `Up` go to the captured sprites first,
    /// then to any other hits. `Up` releases the capture. Sprites with a
    /// singular world matrix are skipped.
    pub fn dispatch_pointer_event(&mut self, mut evt: PointerEvent) -> Result<Vec<NodeId>> {
        evt.canvas_pos = self.config.viewport.to_canvas(evt.viewport_pos);
        let hits = self.pointer_hits(evt.canvas_pos);

        let targets = match evt.kind {
            PointerEventKind::Down => {
                self.captured = hits.iter().map(|&(id, _)| id).collect();
                hits
            }
            PointerEventKind::Drag | PointerEventKind::Up => {
                let mut targets: Vec<(NodeId, Vec2)> = self
                    .captured
                    .iter()
                    .filter_map(|&id| self.local_or_skip(id, evt.canvas_pos).map(|local| (id, local)))
                    .collect();
                for hit in hits {
                    if !self.captured.contains(&hit.0) {
                        targets.push(hit);
                    }
                }
                targets
            }
            PointerEventKind::Move => hits,
        };

        if evt.kind == PointerEventKind::Up {
            self.captured.clear();
        }

        let mut delivered = Vec::with_capacity(targets.len());
        for (id, local) in targets {
            let Some(sprite) = self.tree.get_mut(id) else { continue };
            evt.local_pos = local;
            sprite.handle_pointer(&evt)?;
            delivered.push(id);
        }
        Ok(delivered)
    }

    /// Delivers a key event to every sprite with key listeners, pre-order.
    pub fn dispatch_key_event(&mut self, evt: &KeyEvent) -> Result<Vec<NodeId>> {
        let mut delivered = Vec::new();
        for id in self.tree.pre_order_ids(self.root) {
            let Some(sprite) = self.tree.get_mut(id) else { continue };
            if !sprite.has_key_listeners() {
                continue;
            }
            sprite.handle_key(evt)?;
            delivered.push(id);
        }
        Ok(delivered)
    }

    /// `(id, local point)` of every sprite hit at `canvas`, in draw order,
    /// filtered by the hit policy.
    fn pointer_hits(&self, canvas: Vec2) -> Vec<(NodeId, Vec2)> {
        let order = self.tree.pre_order_ids(self.root);
        match self.config.hit_policy {
            HitPolicy::TestAll => order.into_iter().filter_map(|id| self.hit_at(id, canvas)).collect(),
            HitPolicy::TopmostOnly => order.into_iter().rev().find_map(|id| self.hit_at(id, canvas)).into_iter().collect(),
        }
    }

    fn hit_at(&self, id: NodeId, canvas: Vec2) -> Option<(NodeId, Vec2)> {
        let sprite = self.tree.get(id)?;
        if !sprite.is_visible() {
            return None;
        }
        let local = self.local_or_skip(id, canvas)?;
        sprite.hit_test_local(local).then_some((id, local))
    }

    fn local_or_skip(&self, id: NodeId, canvas: Vec2) -> Option<Vec2> {
        match self.to_local(id, canvas) {
            Ok(local) => Some(local),
            Err(err) => {
                log::debug!("Scene: skipping {id:?} for pointer dispatch: {err}");
                None
            }
        }
    }
}

/// One step of the draw work list.
#[derive(Debug, Copy, Clone)]
enum DrawStep {
    /// Push the node's matrix and state, draw it, then queue its children.
    Enter(NodeId),
    /// Pop what the matching `Enter` pushed.
    Exit,
}

/// State of a single [`Scene::draw`] call.
///
/// Matrices and render states are pushed on `Enter` and popped on the matching
/// `Exit` step. `open_clips` counts clip saves left on the surface by visible
/// `ClipRegion` sprites and not yet released by a visible `EndClip`.
struct DrawPass {
    work: Vec<DrawStep>,
    matrices: MatrixStack,
    states: RenderStateStack,
    scratch: MatrixStack,
    open_clips: usize,
}

impl DrawPass {
    fn new(root: NodeId) -> Self {
        Self {
            work: vec![DrawStep::Enter(root)],
            matrices: MatrixStack::new(),
            states: RenderStateStack::default(),
            scratch: MatrixStack::new(),
            open_clips: 0,
        }
    }

    fn run<D>(&mut self, tree: &mut Tree<Sprite<D>>, surface: &mut dyn DrawingSurface) -> Result<()> {
        while let Some(step) = self.work.pop() {
            let id = match step {
                DrawStep::Enter(id) => id,
                DrawStep::Exit => {
                    self.pop()?;
                    continue;
                }
            };
            let Some(sprite) = tree.get_mut(id) else { continue };

            let local = sprite.transform.to_matrix_with(&mut self.scratch);
            self.matrices.push_matrix();
            self.matrices.mult_matrix(&local);
            self.states.push(sprite.state.clone());
            self.work.push(DrawStep::Exit);

            if sprite.is_visible() {
                match sprite.shape().kind() {
                    ShapeKind::ClipRegion => self.open_clips += 1,
                    ShapeKind::EndClip => self.open_clips = self.open_clips.saturating_sub(1),
                    _ => {}
                }
            }

            let frame = DrawFrame { world: *self.matrices.top(), state: self.states.top() };
            sprite.draw(&frame, surface)?;

            self.work.extend(tree.children(id).iter().rev().map(|&c| DrawStep::Enter(c)));
        }
        Ok(())
    }

    fn pop(&mut self) -> Result<()> {
        self.matrices.pop_matrix()?;
        self.states.restore()
    }

    /// Unwinds whatever an aborted pass left pushed and releases open clips.
    fn finish(mut self, surface: &mut dyn DrawingSurface) {
        let pending = self.work.iter().filter(|s| matches!(s, DrawStep::Exit)).count();
        for _ in 0..pending {
            if self.pop().is_err() {
                break;
            }
        }

        if self.open_clips > 0 {
            log::warn!("Scene::draw: {} clip region(s) left open, restoring", self.open_clips);
            for _ in 0..self.open_clips {
                surface.restore();
            }
        }

        if self.matrices.depth() != 1 || self.states.depth() != 1 {
            log::error!(
                "Scene::draw: unbalanced stacks after pass (matrix depth {}, render state depth {})",
                self.matrices.depth(),
                self.states.depth()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::coords::ViewportMapping;
    use crate::input::{Key, KeyEventKind};
    use crate::shapes::{Circle, ClipRegion, EndClip, Rectangle};
    use crate::sprite::Transform;
    use crate::surface::{RecordingSurface, SurfaceCmd};

    type Log = Rc<RefCell<Vec<String>>>;

    fn recorder(log: &Log, tag: &'static str) -> impl FnMut(&mut Sprite, &PointerEvent) -> Result<()> + 'static {
        let log = log.clone();
        move |_: &mut Sprite, ev: &PointerEvent| {
            log.borrow_mut().push(format!("{tag}:{:?}@{},{}", ev.kind, ev.local_pos.x, ev.local_pos.y));
            Ok(())
        }
    }

    /// root ── a (translate 10,0) ── b (rotate 90°, scale 2,1)
    fn a_b_scene() -> (Scene, NodeId, NodeId) {
        let mut scene = Scene::new();
        let a = scene.add(Sprite::new(Circle::new(1.0), "A").at(10.0, 0.0)).unwrap();
        let b = scene
            .add_sprite(a, Sprite::new(Rectangle::new(4.0, 4.0), "B").rotated(90.0).scaled(2.0, 1.0))
            .unwrap();
        (scene, a, b)
    }

    // ── matrices ──────────────────────────────────────────────────────────

    #[test]
    fn world_matrix_composes_root_to_node() {
        let (scene, _, b) = a_b_scene();
        let p = scene.world_matrix(b).unwrap().transform_point(Vec2::X_AXIS);
        assert!(p.approx_eq_eps(Vec2::new(10.0, 2.0), 1e-4), "{p}");
        let back = scene.to_local(b, p).unwrap();
        assert!(back.approx_eq_eps(Vec2::X_AXIS, 1e-4));
    }

    #[test]
    fn generic_world_matrix_over_plain_transforms() {
        let mut tree = Tree::new();
        let a = tree.insert(Transform::at(10.0, 0.0));
        let b = tree.insert_child(a, Transform::new(0.0, 0.0, 90.0, 2.0, 1.0)).unwrap();
        let p = world_matrix_in(&tree, b).unwrap().transform_point(Vec2::X_AXIS);
        assert!(p.approx_eq_eps(Vec2::new(10.0, 2.0), 1e-4));
    }

    #[test]
    fn singular_world_matrix_is_reported() {
        let (mut scene, a, b) = a_b_scene();
        scene.sprite_mut(a).unwrap().transform.scale = Vec2::zero();
        assert!(matches!(scene.local_matrix(b), Err(SceneError::SingularMatrix { .. })));
        assert!(scene.hit_test(b, Vec2::zero()).is_err());
    }

    // ── container ─────────────────────────────────────────────────────────

    #[test]
    fn root_cannot_be_reparented() {
        let (mut scene, a, _) = a_b_scene();
        let root = scene.root();
        assert!(matches!(scene.attach(a, root), Err(SceneError::InvalidHierarchy(_))));
    }

    #[test]
    fn find_by_name_and_remove() {
        let (mut scene, a, b) = a_b_scene();
        assert_eq!(scene.find_by_name("B"), Some(b));
        let removed = scene.remove_child(scene.root(), a).unwrap();
        assert_eq!(removed.name, "A");
        assert_eq!(scene.find_by_name("B"), None);
        assert_eq!(scene.len(), 1);
    }

    // ── update ────────────────────────────────────────────────────────────

    #[test]
    fn update_pre_before_children_post_after() {
        let log: Log = Rc::default();
        let (mut scene, a, b) = a_b_scene();
        for id in [scene.root(), a, b] {
            let log = log.clone();
            scene.sprite_mut(id).unwrap().on_update(move |s, ev| {
                log.borrow_mut().push(format!("{}:{:?}", s.name, ev.order));
                Ok(())
            });
        }
        scene.update(16.0, 0.016).unwrap();
        assert_eq!(
            *log.borrow(),
            ["root:Pre", "A:Pre", "B:Pre", "B:Post", "A:Post", "root:Post"]
        );
    }

    // ── draw ──────────────────────────────────────────────────────────────

    #[test]
    fn draw_sets_world_transform_per_sprite() {
        let (mut scene, _, b) = a_b_scene();
        let mut surface = RecordingSurface::new();
        scene.draw(&mut surface).unwrap();

        let transforms: Vec<AffineMatrix> = surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                SurfaceCmd::SetTransform(m) => Some(*m),
                _ => None,
            })
            .collect();
        assert_eq!(transforms.len(), 2);
        assert!(transforms[0].approx_eq(&AffineMatrix::translation(10.0, 0.0)));
        assert!(transforms[1].approx_eq_eps(&scene.world_matrix(b).unwrap(), 1e-5));
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn invisible_parent_still_draws_children() {
        let (mut scene, a, _) = a_b_scene();
        scene.sprite_mut(a).unwrap().set_visible(false);
        let mut surface = RecordingSurface::new();
        scene.draw(&mut surface).unwrap();
        assert_eq!(surface.count(|c| matches!(c, SurfaceCmd::Arc { .. })), 0);
        assert_eq!(surface.count(|c| matches!(c, SurfaceCmd::Rect(_))), 1);
    }

    #[test]
    fn clip_pair_across_siblings_is_balanced() {
        let mut scene: Scene = Scene::new();
        scene.add(Sprite::new(ClipRegion::new(Rectangle::new(50.0, 50.0)), "clip")).unwrap();
        scene.add(Sprite::new(Circle::new(80.0), "clipped")).unwrap();
        scene.add(Sprite::new(EndClip, "end")).unwrap();
        let mut surface = RecordingSurface::new();
        scene.draw(&mut surface).unwrap();
        assert_eq!(surface.count(|c| *c == SurfaceCmd::Clip), 1);
        assert_eq!(surface.depth(), 0);
        assert_eq!(surface.unbalanced_restores(), 0);
    }

    #[test]
    fn failing_listener_inside_clip_pair_releases_the_clip() {
        let mut scene: Scene = Scene::new();
        scene.add(Sprite::new(ClipRegion::new(Rectangle::new(50.0, 50.0)), "clip")).unwrap();
        let mid = scene.add(Sprite::new(Circle::new(10.0), "mid")).unwrap();
        scene.add(Sprite::new(EndClip, "end")).unwrap();
        scene
            .sprite_mut(mid)
            .unwrap()
            .on_render(|_, _, _| Err(SceneError::InvalidHierarchy("render failed".into())));

        let mut surface = RecordingSurface::new();
        assert!(scene.draw(&mut surface).is_err());
        assert_eq!(surface.depth(), 0);
        assert_eq!(surface.unbalanced_restores(), 0);

        // The next pass starts from a clean surface.
        surface.clear();
        assert!(scene.draw(&mut surface).is_err());
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn invisible_end_clip_is_released_after_pass() {
        let mut scene: Scene = Scene::new();
        scene.add(Sprite::new(ClipRegion::new(Rectangle::new(50.0, 50.0)), "clip")).unwrap();
        let end = scene.add(Sprite::new(EndClip, "end")).unwrap();
        scene.sprite_mut(end).unwrap().set_visible(false);

        let mut surface = RecordingSurface::new();
        scene.draw(&mut surface).unwrap();
        assert_eq!(surface.depth(), 0);
        assert_eq!(surface.unbalanced_restores(), 0);
    }

    // ── depth ─────────────────────────────────────────────────────────────

    fn chain(depth: usize) -> (Scene, NodeId) {
        let mut scene: Scene = Scene::new();
        let mut parent = scene.root();
        for i in 0..depth {
            parent = scene.add_sprite(parent, Sprite::new(Circle::new(1.0), format!("n{i}"))).unwrap();
        }
        (scene, parent)
    }

    #[test]
    fn deep_chain_updates_and_draws() {
        let (mut scene, leaf) = chain(10_000);
        let post = Rc::new(RefCell::new(0usize));
        let p = post.clone();
        scene.sprite_mut(leaf).unwrap().on_update(move |_, ev| {
            if ev.order == Order::Post {
                *p.borrow_mut() += 1;
            }
            Ok(())
        });
        scene.update(0.0, 0.016).unwrap();
        assert_eq!(*post.borrow(), 1);

        let mut surface = RecordingSurface::new();
        scene.draw(&mut surface).unwrap();
        assert_eq!(surface.count(|c| matches!(c, SurfaceCmd::Arc { .. })), 10_000);
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn draw_error_deep_in_chain_still_balances() {
        let (mut scene, leaf) = chain(3_000);
        scene
            .sprite_mut(leaf)
            .unwrap()
            .on_render(|_, _, _| Err(SceneError::InvalidHierarchy("render failed".into())));
        let mut surface = RecordingSurface::new();
        assert!(scene.draw(&mut surface).is_err());
        assert_eq!(surface.depth(), 0);
    }

    // ── pointer ───────────────────────────────────────────────────────────

    fn overlapping() -> (Scene, NodeId, NodeId, Log) {
        let log: Log = Rc::default();
        let mut scene = Scene::new();
        let under = scene.add(Sprite::new(Circle::new(10.0), "under")).unwrap();
        let over = scene.add(Sprite::new(Circle::new(10.0), "over").at(5.0, 0.0)).unwrap();
        scene.sprite_mut(under).unwrap().on_pointer(recorder(&log, "under"));
        scene.sprite_mut(over).unwrap().on_pointer(recorder(&log, "over"));
        (scene, under, over, log)
    }

    #[test]
    fn test_all_delivers_to_every_hit_in_draw_order() {
        let (mut scene, under, over, log) = overlapping();
        let got = scene.dispatch_pointer_event(PointerEvent::down(6.0, 0.0)).unwrap();
        assert_eq!(got, vec![under, over]);
        assert_eq!(*log.borrow(), ["under:Down@6,0", "over:Down@1,0"]);
    }

    #[test]
    fn topmost_only_delivers_to_last_drawn_hit() {
        let (mut scene, _, over, log) = overlapping();
        scene.config_mut().hit_policy = HitPolicy::TopmostOnly;
        let got = scene.dispatch_pointer_event(PointerEvent::down(6.0, 0.0)).unwrap();
        assert_eq!(got, vec![over]);
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn viewport_mapping_applies_before_hit_test() {
        let (mut scene, under, over, log) = overlapping();
        scene.config_mut().viewport = ViewportMapping::with_origin(Vec2::new(100.0, 100.0));
        assert!(scene.dispatch_pointer_event(PointerEvent::down(6.0, 0.0)).unwrap().is_empty());
        let got = scene.dispatch_pointer_event(PointerEvent::down(106.0, 100.0)).unwrap();
        assert_eq!(got, vec![under, over]);
        assert_eq!(log.borrow()[0], "under:Down@6,0");
    }

    #[test]
    fn capture_keeps_drag_and_up_on_pressed_sprite() {
        let (mut scene, under, _, log) = overlapping();
        scene.config_mut().hit_policy = HitPolicy::TopmostOnly;
        scene.dispatch_pointer_event(PointerEvent::down(-8.0, 0.0)).unwrap();
        assert_eq!(scene.captured(), &[under]);

        // Dragged far outside both circles.
        let got = scene.dispatch_pointer_event(PointerEvent::drag(-50.0, 0.0)).unwrap();
        assert_eq!(got, vec![under]);
        let got = scene.dispatch_pointer_event(PointerEvent::up(-50.0, 0.0)).unwrap();
        assert_eq!(got, vec![under]);
        assert!(scene.captured().is_empty());

        assert_eq!(log.borrow().last().map(String::as_str), Some("under:Up@-50,0"));
    }

    #[test]
    fn invisible_and_singular_sprites_are_skipped() {
        let (mut scene, under, over, _) = overlapping();
        scene.sprite_mut(under).unwrap().set_visible(false);
        scene.sprite_mut(over).unwrap().transform.scale = Vec2::new(0.0, 1.0);
        let got = scene.dispatch_pointer_event(PointerEvent::down(6.0, 0.0)).unwrap();
        assert!(got.is_empty());
    }

    // ── keys ──────────────────────────────────────────────────────────────

    #[test]
    fn keys_reach_every_listener_in_pre_order() {
        let (mut scene, a, b) = a_b_scene();
        let seen: Rc<RefCell<Vec<String>>> = Rc::default();
        for id in [b, a] {
            let seen = seen.clone();
            scene.sprite_mut(id).unwrap().on_key(move |s, ev| {
                seen.borrow_mut().push(format!("{}:{:?}", s.name, ev.key));
                Ok(())
            });
        }
        let got = scene.dispatch_key_event(&KeyEvent::new(KeyEventKind::Down, Key::Space)).unwrap();
        assert_eq!(got, vec![a, b]);
        assert_eq!(*seen.borrow(), ["A:Space", "B:Space"]);
    }
}
