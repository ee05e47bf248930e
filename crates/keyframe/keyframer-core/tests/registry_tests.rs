use hashbrown::HashMap;
use keyframer_core::{
    Animatable, Config, CoreEvent, KeyframeError, ObjectId, PlaybackEvent, Registry, Timeline,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

#[derive(Clone, Debug, Default)]
struct Box2d {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    rot: f32,
    color: [f32; 4],
}

impl Box2d {
    fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            w: 5.0,
            h: 5.0,
            color: [1.0, 1.0, 0.0, 1.0],
            ..Default::default()
        }
    }
}

impl Animatable for Box2d {
    fn x(&self) -> f32 {
        self.x
    }
    fn y(&self) -> f32 {
        self.y
    }
    fn width(&self) -> f32 {
        self.w
    }
    fn height(&self) -> f32 {
        self.h
    }
    fn rotation_degrees(&self) -> f32 {
        self.rot
    }
    fn color(&self) -> [f32; 4] {
        self.color
    }
    fn set_x(&mut self, x: f32) {
        self.x = x;
    }
    fn set_y(&mut self, y: f32) {
        self.y = y;
    }
    fn set_width(&mut self, width: f32) {
        self.w = width;
    }
    fn set_height(&mut self, height: f32) {
        self.h = height;
    }
    fn set_rotation_degrees(&mut self, degrees: f32) {
        self.rot = degrees;
    }
    fn set_color(&mut self, color: [f32; 4]) {
        self.color = color;
    }
}

/// Record `obj` moving by (dx, dy) over one second into a new timeline.
fn record_move(reg: &mut Registry, id: ObjectId, obj: &mut Box2d, dx: f32, dy: f32) -> usize {
    let start = obj.clone();
    let tl = reg.new_timeline(id, &start);
    tl.insert(&start, None).unwrap();
    obj.x += dx;
    obj.y += dy;
    tl.insert(&*obj, None).unwrap();
    *obj = start;
    reg.timeline_count(id).unwrap() - 1
}

#[test]
fn register_new_timeline_insert_round_trip() {
    init_logging();
    let mut reg = Registry::default();
    let obj = Box2d::at(0.0, 0.0);
    let id = reg.register(&obj);

    let tl = reg.new_timeline(id, &obj);
    tl.insert(&obj, None).unwrap();

    let timelines = reg.timelines(id).unwrap();
    assert_eq!(timelines.len(), 1);
    assert_eq!(timelines[0].len(), 1);
    assert_eq!(reg.active_index(id), Some(0));
    assert_eq!(reg.active_timeline(id).unwrap().len(), 1);
}

#[test]
fn unknown_objects_are_absent() {
    let mut reg = Registry::default();
    let ghost = ObjectId(42);
    assert!(reg.timelines(ghost).is_none());
    assert!(reg.active_timeline(ghost).is_none());
    assert!(reg.active_index(ghost).is_none());
    assert!(reg.timeline_count(ghost).is_none());
    assert!(reg.is_playing(ghost).is_none());
    assert_eq!(
        reg.play(ghost, false).unwrap_err(),
        KeyframeError::NotRegistered { object: ghost }
    );
    assert_eq!(
        reg.set_active_timeline(ghost, 0).unwrap_err(),
        KeyframeError::NotRegistered { object: ghost }
    );
    let mut obj = Box2d::at(0.0, 0.0);
    assert!(reg.tick(ghost, &mut obj).is_err());
}

#[test]
fn new_timeline_registers_implicitly() {
    let mut reg = Registry::default();
    let obj = Box2d::at(0.0, 0.0);
    let id = ObjectId(7);
    assert!(!reg.contains(id));
    reg.new_timeline(id, &obj).insert(&obj, None).unwrap();
    assert!(reg.contains(id));
    assert_eq!(reg.timeline_count(id), Some(1));

    // Issued ids never collide with caller-chosen ones.
    let next = reg.register(&obj);
    assert_eq!(next, ObjectId(8));
}

#[test]
fn issued_ids_skip_live_entries_after_wrapping() {
    let mut reg = Registry::default();
    let mut a = Box2d::at(0.0, 0.0);
    let ida = reg.register(&a);
    assert_eq!(ida, ObjectId(0));
    record_move(&mut reg, ida, &mut a, 10.0, 0.0);

    // The highest caller-chosen id wraps the allocator back to 0.
    let top = ObjectId(u32::MAX);
    assert!(!reg.register_as(top, &a));

    let idc = reg.register(&a);
    assert_ne!(idc, ida);
    assert_ne!(idc, top);
    assert_eq!(reg.len(), 3);
    assert_eq!(reg.timeline_count(ida), Some(1));
    assert_eq!(reg.timeline_count(idc), Some(0));
}

#[test]
fn re_registration_resets_state() {
    let mut reg = Registry::default();
    let mut obj = Box2d::at(0.0, 0.0);
    let id = reg.register(&obj);
    record_move(&mut reg, id, &mut obj, 10.0, 0.0);
    assert_eq!(reg.timeline_count(id), Some(1));

    assert!(reg.register_as(id, &obj));
    assert_eq!(reg.timeline_count(id), Some(0));
    assert!(reg.active_timeline(id).is_none());
    assert!(reg.active_index(id).is_none());
}

#[test]
fn set_active_clamps_out_of_range() {
    let mut reg = Registry::default();
    let mut obj = Box2d::at(0.0, 0.0);
    let id = reg.register(&obj);
    assert_eq!(
        reg.set_active_timeline(id, 0).unwrap_err(),
        KeyframeError::EmptyTimeline
    );
    for _ in 0..3 {
        record_move(&mut reg, id, &mut obj, 1.0, 0.0);
    }
    assert_eq!(reg.set_active_timeline(id, 1).unwrap(), 1);
    assert_eq!(reg.set_active_timeline(id, -1).unwrap(), 2);
    assert_eq!(reg.set_active_timeline(id, 0).unwrap(), 0);
    assert_eq!(reg.set_active_timeline(id, 4).unwrap(), 2);
    assert_eq!(reg.active_index(id), Some(2));
}

#[test]
fn duplicate_timelines_are_permitted() {
    let mut reg = Registry::default();
    let obj = Box2d::at(0.0, 0.0);
    let id = reg.register(&obj);
    let mut tl = Timeline::new();
    tl.insert(&obj, None).unwrap();
    let set = reg.set_mut(id).unwrap();
    assert_eq!(set.add_timeline(tl.clone()), 0);
    assert_eq!(set.add_timeline(tl), 1);
    assert_eq!(reg.timeline_count(id), Some(2));
}

#[test]
fn tick_all_fans_out_to_every_object() {
    init_logging();
    let mut reg = Registry::new(Config::default());
    let mut objects: HashMap<ObjectId, Box2d> = HashMap::new();

    let mut a = Box2d::at(0.0, 0.0);
    let mut b = Box2d::at(0.0, 7.0);
    let ida = reg.register(&a);
    let idb = reg.register(&b);
    record_move(&mut reg, ida, &mut a, 10.0, 0.0);
    record_move(&mut reg, idb, &mut b, 0.0, -7.0);
    objects.insert(ida, a);
    objects.insert(idb, b);

    reg.play_all(false);
    for _ in 0..30 {
        let out = reg.tick_all(&mut objects);
        assert!(out.is_empty());
    }
    approx(objects[&ida].x, 5.0, 1e-5);
    approx(objects[&idb].y, 3.5, 1e-5);

    for _ in 0..30 {
        reg.tick_all(&mut objects);
    }
    let out = reg.tick_all(&mut objects);
    let mut ended: Vec<CoreEvent> = out.events.clone();
    ended.sort_by_key(|e| e.object);
    assert_eq!(
        ended,
        vec![
            CoreEvent {
                object: ida,
                event: PlaybackEvent::Ended
            },
            CoreEvent {
                object: idb,
                event: PlaybackEvent::Ended
            },
        ]
    );
    assert_eq!(reg.is_playing(ida), Some(false));
    assert_eq!(reg.is_playing(idb), Some(false));
}

#[test]
fn play_all_looping_and_pause_all() {
    let mut reg = Registry::default();
    let mut a = Box2d::at(0.0, 0.0);
    let ida = reg.register(&a);
    record_move(&mut reg, ida, &mut a, 10.0, 0.0);
    let mut objects = vec![(ida, a)];

    reg.play_all(true);
    let mut looped = 0;
    for _ in 0..61 {
        let out = reg.tick_all(&mut objects);
        looped += out
            .events_for(ida)
            .filter(|e| **e == PlaybackEvent::Looped)
            .count();
    }
    assert_eq!(looped, 1);
    approx(objects[0].1.x, 0.0, 1e-6);
    assert_eq!(reg.set(ida).unwrap().player().tick(), 0);

    for _ in 0..6 {
        reg.tick_all(&mut objects);
    }
    approx(objects[0].1.x, 1.0, 1e-5);

    reg.pause_all();
    for _ in 0..10 {
        reg.tick_all(&mut objects);
    }
    approx(objects[0].1.x, 1.0, 1e-5);
    assert_eq!(reg.is_playing(ida), Some(false));
}

#[test]
fn per_object_play_uses_active_timeline() {
    let mut reg = Registry::default();
    let mut a = Box2d::at(0.0, 0.0);
    let ida = reg.register(&a);
    record_move(&mut reg, ida, &mut a, 10.0, 0.0);
    record_move(&mut reg, ida, &mut a, 0.0, 20.0);

    reg.set_active_timeline(ida, 1).unwrap();
    reg.play(ida, false).unwrap();
    for _ in 0..30 {
        reg.tick(ida, &mut a).unwrap();
    }
    approx(a.x, 0.0, 1e-6);
    approx(a.y, 10.0, 1e-5);

    reg.pause(ida).unwrap();
    assert_eq!(reg.is_playing(ida), Some(false));
}

#[test]
fn unresolved_objects_are_reported() {
    let mut reg = Registry::default();
    let mut a = Box2d::at(0.0, 0.0);
    let ida = reg.register(&a);
    record_move(&mut reg, ida, &mut a, 10.0, 0.0);
    reg.play_all(false);

    let mut nothing: HashMap<ObjectId, Box2d> = HashMap::new();
    let out = reg.tick_all(&mut nothing);
    assert_eq!(out.unresolved, vec![ida]);
    // Skipped ticks do not advance playback.
    assert_eq!(reg.set(ida).unwrap().player().tick(), 0);
}

#[test]
fn registry_interpolation_override() {
    let mut reg = Registry::default();
    let mut a = Box2d::at(0.0, 0.0);
    let ida = reg.register(&a);
    record_move(&mut reg, ida, &mut a, 10.0, 0.0);

    reg.set_interpolation(
        ida,
        serde_json::json!({ "y": 3.0 }),
        |_: Option<&Timeline>, params: &serde_json::Value, object: &mut dyn Animatable| {
            object.set_y(params["y"].as_f64().unwrap_or(0.0) as f32);
        },
    )
    .unwrap();
    reg.play(ida, false).unwrap();
    reg.tick(ida, &mut a).unwrap();
    approx(a.y, 3.0, 1e-6);
    approx(a.x, 0.0, 1e-6);

    reg.clear_interpolation(ida).unwrap();
    reg.tick(ida, &mut a).unwrap();
    approx(a.x, 10.0 / 60.0, 1e-5);
}

#[test]
fn unregister_drops_everything() {
    let mut reg = Registry::default();
    let mut a = Box2d::at(0.0, 0.0);
    let ida = reg.register(&a);
    record_move(&mut reg, ida, &mut a, 10.0, 0.0);
    let removed = reg.unregister(ida).unwrap();
    assert_eq!(removed.len(), 1);
    assert_eq!(removed.object(), ida);
    assert!(reg.is_empty());
    assert!(reg.timelines(ida).is_none());
}

#[test]
fn timelines_can_be_edited_through_the_registry() {
    let mut reg = Registry::default();
    let mut a = Box2d::at(0.0, 0.0);
    let ida = reg.register(&a);
    record_move(&mut reg, ida, &mut a, 10.0, 0.0);

    a.x = 50.0;
    reg.timeline_mut(ida, 0).unwrap().insert(&a, None).unwrap();
    assert_eq!(reg.active_timeline(ida).unwrap().ticks(), vec![0, 60, 120]);

    reg.active_timeline_mut(ida).unwrap().delete_at(None).unwrap();
    reg.active_timeline_mut(ida).unwrap().reset().unwrap();
    assert!(reg.active_timeline(ida).unwrap().is_empty());
    assert!(reg.timeline_mut(ida, 3).is_none());
}
