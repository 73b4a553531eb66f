use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tui_pairs::core::{BoardGenerator, BoardRng, RoundConfig, RoundSnapshot, Session};
use tui_pairs::term::{FrameBuffer, GameView, Viewport, FACE_GLYPHS};
use tui_pairs::types::TICK_MS;

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

/// Index pairs `(matching, mismatching)` on the current board, skipping `used`.
fn pick_pairs(s: &Session, used: &[usize]) -> ((usize, usize), (usize, usize)) {
    let cards = s.controller().cards();
    let free: Vec<usize> = (0..cards.len()).filter(|i| !used.contains(i)).collect();
    let a = free[0];
    let b = free[1..]
        .iter()
        .copied()
        .find(|&j| cards[j].card_id() == cards[a].card_id())
        .unwrap();
    let rest: Vec<usize> = free.iter().copied().filter(|&i| i != a && i != b).collect();
    let c = rest[0];
    let d = rest[1..]
        .iter()
        .copied()
        .find(|&j| cards[j].card_id() != cards[c].card_id())
        .unwrap();
    ((a, b), (c, d))
}

fn frame(s: &mut Session, snap: &mut RoundSnapshot, view: &GameView, vp: Viewport, fb: &mut FrameBuffer) {
    s.tick(TICK_MS);
    let _ = s.take_events().count();
    s.snapshot_into(snap);
    view.render_into(snap, Some((1, 1)), vp, fb);
}

#[test]
fn round_tick_and_render_are_allocation_free_after_warmup() {
    let config = RoundConfig::new(4, 4, 600).unwrap();
    let mut s = Session::new(config, BoardGenerator::new(FACE_GLYPHS.len()), BoardRng::new(3));
    s.start_new_round();

    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let mut fb = FrameBuffer::new(vp.width, vp.height);
    let mut snap = RoundSnapshot::default();

    // Warm-up: one match and one miss touch every buffer and log callsite.
    let ((a, b), (c, d)) = pick_pairs(&s, &[]);
    for (x, y) in [(a, b), (c, d)] {
        s.reveal(x);
        s.reveal(y);
        for _ in 0..60 {
            frame(&mut s, &mut snap, &view, vp, &mut fb);
        }
    }
    assert_eq!(s.controller().remaining_pairs(), 7);

    let ((e, f), (g, h)) = pick_pairs(&s, &[a, b]);
    let allocs = with_alloc_counting(|| {
        for (x, y) in [(e, f), (g, h)] {
            s.reveal(x);
            s.reveal(y);
            for _ in 0..60 {
                frame(&mut s, &mut snap, &view, vp, &mut fb);
            }
        }
    });

    assert_eq!(s.controller().remaining_pairs(), 6);
    assert_eq!(allocs, 0);
}
