//! Integration tests: end-to-end allocator scenarios over both region
//! kinds.

use glint_arena::{Arena, ArenaConfig, ArenaError, SharedArena};

#[test]
fn full_arena_reuses_released_space() {
    let mut arena = Arena::new(ArenaConfig::new(1024)).unwrap();
    let a = arena.allocate(512).unwrap();
    let b = arena.allocate(512).unwrap();

    match arena.allocate(1) {
        Err(ArenaError::OutOfMemory { requested: 1, largest_free: 0 }) => {}
        other => panic!("expected OutOfMemory, got {other:?}"),
    }

    arena.release(a).unwrap();
    let c = arena.allocate(512).unwrap();
    assert_eq!(c.offset(), a.offset());
    assert!(!c.overlaps(&b));
    arena.check_integrity().unwrap();
}

#[test]
fn external_region_is_used_in_place_and_left_to_host() {
    let mut backing = vec![0xAAu8; 2048];
    {
        let mut arena = Arena::external(&mut backing).unwrap();
        assert!(arena.is_external());
        assert_eq!(arena.capacity(), 2048);

        let h = arena.allocate(16).unwrap();
        arena.bytes_mut(&h).unwrap().copy_from_slice(b"glint-arena-test");
        let z = arena.allocate_zeroed(8).unwrap();
        assert_eq!(arena.bytes(&z).unwrap(), &[0u8; 8]);
    }
    // The arena is gone; the bytes it wrote live on in the host's buffer.
    assert_eq!(&backing[..16], b"glint-arena-test");
    assert_eq!(&backing[16..24], &[0u8; 8]);
    assert_eq!(backing[24], 0xAA);
}

#[test]
fn double_release_never_corrupts_later_allocations() {
    let mut arena = Arena::new(ArenaConfig::new(1024)).unwrap();
    let a = arena.allocate(256).unwrap();
    arena.release(a).unwrap();

    let err = arena.release(a).unwrap_err();
    assert!(err.is_handle_misuse());
    assert!(matches!(err, ArenaError::DoubleRelease { .. }));

    // The space was reissued; the stale handle must not free it again.
    let b = arena.allocate(256).unwrap();
    assert_eq!(b.offset(), a.offset());
    assert!(arena.release(a).is_err());
    assert!(arena.is_live(&b));

    let c = arena.allocate(256).unwrap();
    assert!(!b.overlaps(&c));
    arena.check_integrity().unwrap();
}

#[test]
fn fragmentation_then_full_recovery() {
    let mut arena = Arena::new(ArenaConfig::new(4096)).unwrap();
    let handles: Vec<_> = (0..32).map(|_| arena.allocate(100).unwrap()).collect();
    let (evens, odds): (Vec<_>, Vec<_>) = handles
        .iter()
        .enumerate()
        .partition(|(i, _)| i % 2 == 0);

    for (_, h) in &evens {
        arena.release(**h).unwrap();
    }
    let stats = arena.statistics();
    assert_eq!(stats.free_blocks, 17);
    assert!(stats.frag_pct() > 50);
    // 104-byte holes: a 200-byte request only fits in the tail.
    let big = arena.allocate(200).unwrap();
    assert!(big.offset() >= 32 * 104);
    arena.release(big).unwrap();

    for (_, h) in &odds {
        arena.release(**h).unwrap();
    }
    let stats = arena.statistics();
    assert_eq!(stats.used, 0);
    assert_eq!(stats.free_blocks, 1);
    assert_eq!(stats.largest_free_block, 4096);
    assert_eq!(stats.frag_pct(), 0);
    assert_eq!(stats.peak_used, 32 * 104);
}

#[test]
fn reallocate_moves_data_when_neighbour_is_busy() {
    let mut arena = Arena::new(ArenaConfig::new(1024)).unwrap();
    let a = arena.allocate(8).unwrap();
    let _fence = arena.allocate(8).unwrap();
    arena.bytes_mut(&a).unwrap().copy_from_slice(&[7; 8]);

    let moved = arena.reallocate(a, 64).unwrap();
    assert_ne!(moved.offset(), a.offset());
    assert_eq!(&arena.bytes(&moved).unwrap()[..8], &[7; 8]);
    assert!(!arena.is_live(&a));
    arena.check_integrity().unwrap();
}

#[test]
fn shared_arena_clones_see_one_block_table() {
    let shared = SharedArena::new(ArenaConfig::new(2048)).unwrap();
    let other = shared.clone();
    let h = shared.allocate(100).unwrap();
    assert_eq!(other.statistics().used_blocks, 1);
    other.release(h).unwrap();
    assert_eq!(shared.statistics().used, 0);
    assert!(matches!(
        shared.release(h),
        Err(ArenaError::DoubleRelease { .. })
    ));
}
