use crate::constants::{slope, SEGMENT_HEIGHT_BLOCKED};
use crate::coordinates::{BoundBoxXyz, CoordsXyz, Direction};
use crate::image::{FilterPalette, ImageTemplate};
use crate::ledger::{SegmentMask, SupportHeight};
use crate::metal::MetalColumn;
use crate::recording::RecordingSink;
use crate::renderer::SupportRenderer;
use crate::session::{TileSupportState, ViewFlags};
use crate::support_types::{MetalExtension, MetalSupportType, TileSegment};

const TUBES_BASE: u32 = 3243;
const TUBES_BEAM: u32 = 3209;
const TUBES_CAP_BEAM: u32 = 3226;
const STICK_BEAM: u32 = 3658;

fn tubes(height: i32) -> MetalColumn {
    MetalColumn::new(MetalSupportType::Tubes, height, ImageTemplate::default())
}

fn flat_tile() -> TileSupportState {
    TileSupportState::on_flat_ground(Direction::West)
}

#[test]
fn base_then_beams() {
    let renderer = SupportRenderer::default();
    let mut state = flat_tile();
    let mut sink = RecordingSink::new();
    assert!(renderer.metal_a(&mut state, &mut sink, TileSegment::Centre, &tubes(40)));

    assert_eq!(
        sink.image_indices(),
        vec![TUBES_BASE, TUBES_BEAM + 9, TUBES_BEAM + 15, TUBES_BEAM + 7]
    );
    let commands = sink.commands();
    assert_eq!(commands[0].offset, CoordsXyz::new(16, 16, 0));
    assert_eq!(
        commands[0].bound_box,
        BoundBoxXyz::new(CoordsXyz::new(16, 16, 0), CoordsXyz::new(0, 0, 5))
    );
    assert_eq!(commands[1].offset, CoordsXyz::new(16, 16, 6));
    assert_eq!(commands[1].bound_box.length, CoordsXyz::new(0, 0, 9));
    assert_eq!(commands[2].offset.z, 16);
    assert_eq!(commands[3].offset.z, 32);

    assert_eq!(
        state.segments.get(TileSegment::Centre),
        SupportHeight::FINALIZED
    );
    assert_eq!(state.segments.get(TileSegment::TopCorner), SupportHeight::GROUND);
}

#[test]
fn sprites_cover_the_column() {
    let renderer = SupportRenderer::default();
    for support_type in MetalSupportType::ALL {
        for height in 1..=200 {
            let mut state = flat_tile();
            let mut sink = RecordingSink::new();
            assert!(renderer.metal_b(
                &mut state,
                &mut sink,
                TileSegment::TopCorner,
                &MetalColumn::new(support_type, height, ImageTemplate::default())
            ));
            let mut covered = 0;
            for command in sink.commands() {
                assert_eq!(command.offset.z, covered, "{:?} to {}", support_type, height);
                // base boxes are 5 high but cover 6 units; beam boxes are one short
                covered += command.bound_box.length.z + 1;
            }
            assert_eq!(covered, height, "{:?} to {}", support_type, height);
        }
    }
}

#[test]
fn seam_every_fourth_chunk() {
    let renderer = SupportRenderer::default();
    let stick = MetalColumn::new(MetalSupportType::Stick, 144, ImageTemplate::default());
    let mut state = flat_tile();
    let mut sink = RecordingSink::new();
    assert!(renderer.metal_a(&mut state, &mut sink, TileSegment::Centre, &stick));
    let full = STICK_BEAM + 15;
    let seam = STICK_BEAM + 16;
    assert_eq!(
        sink.image_indices(),
        // the first beam only brings the stack to a boundary and isn't counted
        vec![full, full, full, full, seam, full, full, full, seam]
    );
}

#[test]
fn seam_needs_full_length_chunk() {
    let renderer = SupportRenderer::default();
    let stick = MetalColumn::new(MetalSupportType::Stick, 72, ImageTemplate::default());
    let mut state = flat_tile();
    let mut sink = RecordingSink::new();
    assert!(renderer.metal_b(&mut state, &mut sink, TileSegment::Centre, &stick));
    let full = STICK_BEAM + 15;
    assert_eq!(
        sink.image_indices(),
        vec![full, full, full, full, STICK_BEAM + 7]
    );
}

#[test]
fn first_beam_reaches_boundary() {
    let renderer = SupportRenderer::default();
    let mut state = flat_tile();
    state.set_segment_support_height(SegmentMask::CENTRE, 8, slope::FLAT);
    let stick = MetalColumn::new(MetalSupportType::Stick, 40, ImageTemplate::default());
    let mut sink = RecordingSink::new();
    assert!(renderer.metal_a(&mut state, &mut sink, TileSegment::Centre, &stick));
    assert_eq!(
        sink.image_indices(),
        vec![STICK_BEAM + 7, STICK_BEAM + 15, STICK_BEAM + 7]
    );
    assert_eq!(sink.commands()[0].offset.z, 8);
}

#[test]
fn shaped_base_follows_slope() {
    let renderer = SupportRenderer::default();
    let mut state = flat_tile();
    state.set_segment_support_height(SegmentMask::CENTRE, 16, slope::DOUBLE_HEIGHT | 0x0B);
    let mut sink = RecordingSink::new();
    assert!(renderer.metal_a(&mut state, &mut sink, TileSegment::Centre, &tubes(48)));
    assert_eq!(sink.image_indices()[0], TUBES_BASE + 16);
    assert_eq!(sink.commands()[0].offset.z, 16);
    assert_eq!(sink.commands()[1].offset.z, 22);
}

#[test]
fn no_base_without_room_or_on_flat_cap() {
    let renderer = SupportRenderer::default();
    let mut state = flat_tile();
    let mut sink = RecordingSink::new();
    assert!(renderer.metal_a(&mut state, &mut sink, TileSegment::Centre, &tubes(5)));
    assert_eq!(sink.image_indices(), vec![TUBES_BEAM + 4]);

    let mut state = flat_tile();
    state.set_segment_support_height(SegmentMask::ALL, 16, slope::FLAT_CAP);
    let mut sink = RecordingSink::new();
    assert!(renderer.metal_a(&mut state, &mut sink, TileSegment::LeftCorner, &tubes(48)));
    assert_eq!(sink.image_indices(), vec![TUBES_BEAM + 15, TUBES_BEAM + 15]);
    assert_eq!(sink.commands()[0].offset, CoordsXyz::new(28, 4, 16));
}

#[test]
fn stub_hangs_from_crossbeam() {
    let renderer = SupportRenderer::default();
    let mut state = flat_tile();
    state.set_segment_support_height(SegmentMask::of(TileSegment::TopCorner), 64, slope::FLAT);
    let mut sink = RecordingSink::new();
    assert!(renderer.metal_a(&mut state, &mut sink, TileSegment::TopCorner, &tubes(40)));

    assert_eq!(
        sink.image_indices(),
        vec![3370, TUBES_BASE, TUBES_BEAM + 9, TUBES_BEAM + 15, TUBES_BEAM + 1]
    );
    let crossbeam = sink.commands()[0];
    assert_eq!(crossbeam.offset, CoordsXyz::new(2, 3, 34));
    assert_eq!(
        crossbeam.bound_box,
        BoundBoxXyz::new(CoordsXyz::new(2, 3, 34), CoordsXyz::new(18, 3, 1))
    );
    // the stub itself stands on the partner segment
    assert_eq!(sink.commands()[1].offset, CoordsXyz::new(16, 4, 0));

    assert_eq!(
        state.segments.get(TileSegment::TopLeftSide),
        SupportHeight::new(40, slope::FLAT_CAP)
    );
    assert_eq!(state.segments.get(TileSegment::TopCorner).height, 64);
}

#[test]
fn metal_b_stub_stays_on_its_segment() {
    let renderer = SupportRenderer::default();
    let mut state = flat_tile();
    state.set_segment_support_height(SegmentMask::of(TileSegment::TopCorner), 64, slope::FLAT);
    let mut sink = RecordingSink::new();
    assert!(renderer.metal_b(&mut state, &mut sink, TileSegment::TopCorner, &tubes(40)));

    // nothing fits between the crossbeam and the segment's own height
    assert_eq!(sink.image_indices(), vec![3370]);
    assert_eq!(sink.commands()[0].offset, CoordsXyz::new(2, 3, 34));
    assert_eq!(
        state.segments.get(TileSegment::TopCorner),
        SupportHeight::new(40, slope::FLAT_CAP)
    );
    assert_eq!(state.segments.get(TileSegment::TopLeftSide), SupportHeight::GROUND);
}

#[test]
fn crossbeam_search_skips_tall_neighbours() {
    let renderer = SupportRenderer::default();
    let mut state = flat_tile();
    state.set_segment_support_height(SegmentMask::of(TileSegment::TopCorner), 64, slope::FLAT);
    state.set_segment_support_height(SegmentMask::of(TileSegment::TopLeftSide), 48, slope::FLAT);
    let mut sink = RecordingSink::new();
    assert!(renderer.metal_a(&mut state, &mut sink, TileSegment::TopCorner, &tubes(40)));
    assert_eq!(sink.image_indices()[0], 3371);
    assert_eq!(sink.commands()[0].offset, CoordsXyz::new(4, 2, 34));
    assert_eq!(sink.commands()[0].bound_box.length, CoordsXyz::new(3, 18, 1));
    assert!(state.segments.get(TileSegment::TopRightSide).has_flat_cap());
}

#[test]
fn crossbeam_partner_depends_on_rotation() {
    let renderer = SupportRenderer::default();
    let mut state = TileSupportState::on_flat_ground(Direction::North);
    state.set_segment_support_height(SegmentMask::CENTRE, 64, slope::FLAT);
    let mut sink = RecordingSink::new();
    assert!(renderer.metal_a(&mut state, &mut sink, TileSegment::Centre, &tubes(40)));
    // crossbeam 0 from the centre: anchor (16, 16) moved by (-15, -1)
    assert_eq!(sink.commands()[0].offset, CoordsXyz::new(1, 15, 34));
    assert!(state.segments.get(TileSegment::TopRightSide).has_flat_cap());
}

#[test]
fn wide_crossbeams_only_drawn_by_a() {
    let renderer = SupportRenderer::default();
    let mut state = flat_tile();
    let tall = SegmentMask::of(TileSegment::TopCorner)
        | SegmentMask::of(TileSegment::TopLeftSide)
        | SegmentMask::of(TileSegment::TopRightSide);
    state.set_segment_support_height(tall, 64, slope::FLAT);
    let before = state.clone();

    let mut sink = RecordingSink::new();
    assert!(!renderer.metal_b(&mut state, &mut sink, TileSegment::TopCorner, &tubes(40)));
    assert!(sink.is_empty());
    assert_eq!(state, before);

    assert!(renderer.metal_a(&mut state, &mut sink, TileSegment::TopCorner, &tubes(40)));
    assert_eq!(sink.image_indices()[0], 3372);
    assert_eq!(sink.commands()[0].bound_box.length, CoordsXyz::new(32, 3, 1));
    assert!(state.segments.get(TileSegment::LeftCorner).has_flat_cap());
}

#[test]
fn no_partner_within_reach() {
    let renderer = SupportRenderer::default();
    let mut state = flat_tile();
    state.set_segment_support_height(SegmentMask::ALL, 64, slope::FLAT);
    let before = state.clone();
    let mut sink = RecordingSink::new();
    assert!(!renderer.metal_a(&mut state, &mut sink, TileSegment::TopCorner, &tubes(40)));
    assert!(!renderer.metal_b(&mut state, &mut sink, TileSegment::TopCorner, &tubes(40)));
    assert!(sink.is_empty());
    assert_eq!(state, before);
}

#[test]
fn stub_below_ground_is_skipped() {
    let renderer = SupportRenderer::default();
    let mut state = flat_tile();
    state.set_segment_support_height(SegmentMask::CENTRE, 64, slope::FLAT);
    let before = state.clone();
    let mut sink = RecordingSink::new();
    assert!(!renderer.metal_a(&mut state, &mut sink, TileSegment::Centre, &tubes(4)));
    assert!(sink.is_empty());
    assert_eq!(state, before);
}

#[test]
fn repeat_placement_does_not_restack() {
    let renderer = SupportRenderer::default();
    let mut state = flat_tile();
    let mut sink = RecordingSink::new();
    assert!(renderer.metal_b(&mut state, &mut sink, TileSegment::Centre, &tubes(40)));
    let first = sink.take_commands();
    assert_eq!(first.len(), 4);
    assert_eq!(state.segments.get(TileSegment::Centre).height, SEGMENT_HEIGHT_BLOCKED);

    // The segment is finished, so the second call can only add a crossbeam stub
    renderer.metal_b(&mut state, &mut sink, TileSegment::Centre, &tubes(40));
    assert!(sink
        .commands()
        .iter()
        .all(|c| !(TUBES_BEAM..TUBES_BEAM + 17).contains(&c.image.index)));
}

#[test]
fn extension_on_top() {
    let renderer = SupportRenderer::default();
    let column = tubes(32).with_extension(MetalExtension::new(20));

    let mut state = flat_tile();
    let mut sink = RecordingSink::new();
    assert!(renderer.metal_a(&mut state, &mut sink, TileSegment::Centre, &column));
    let indices = sink.image_indices();
    assert_eq!(&indices[3..], &[TUBES_CAP_BEAM + 15, TUBES_CAP_BEAM + 3]);
    let extension = &sink.commands()[3..];
    assert_eq!(extension[0].offset, CoordsXyz::new(16, 16, 32));
    assert_eq!(extension[1].offset, CoordsXyz::new(16, 16, 48));
    for command in extension {
        assert_eq!(
            command.bound_box,
            BoundBoxXyz::new(CoordsXyz::new(16, 16, 32), CoordsXyz::new(0, 0, 0))
        );
    }

    let mut state = flat_tile();
    let mut sink = RecordingSink::new();
    assert!(renderer.metal_b(&mut state, &mut sink, TileSegment::Centre, &column));
    assert_eq!(&sink.image_indices()[3..], &[TUBES_BEAM + 15, TUBES_BEAM + 3]);
}

#[test]
fn lowered_extension() {
    let renderer = SupportRenderer::default();
    let column = tubes(32).with_extension(MetalExtension::lowered(20));

    let mut state = flat_tile();
    let mut sink = RecordingSink::new();
    assert!(renderer.metal_a(&mut state, &mut sink, TileSegment::Centre, &column));
    let extension = &sink.commands()[3..];
    assert_eq!(extension.len(), 2);
    assert_eq!(extension[0].offset.z, 31);
    assert_eq!(extension[1].offset.z, 47);
    assert_eq!(extension[1].bound_box.offset.z, 31);

    let mut state = flat_tile();
    let mut sink = RecordingSink::new();
    assert!(renderer.metal_b(&mut state, &mut sink, TileSegment::Centre, &column));
    assert_eq!(sink.len(), 3);
}

#[test]
fn hidden_and_invisible() {
    let renderer = SupportRenderer::default();
    let mut state = flat_tile();
    state.view_flags = ViewFlags::HIDE_SUPPORTS;
    let mut sink = RecordingSink::new();
    assert!(renderer.metal_a(&mut state, &mut sink, TileSegment::Centre, &tubes(16)));
    assert!(sink
        .commands()
        .iter()
        .all(|c| c.image.template.transparency == Some(FilterPalette::Darken1)));

    let mut state = flat_tile();
    state.view_flags = ViewFlags::HIDE_SUPPORTS | ViewFlags::INVISIBLE_SUPPORTS;
    let mut sink = RecordingSink::new();
    assert!(!renderer.metal_a(&mut state, &mut sink, TileSegment::Centre, &tubes(16)));
    assert!(sink.is_empty());
    // untouched, so a visible pass later would still draw it
    assert_eq!(state.segments.get(TileSegment::Centre), SupportHeight::GROUND);
}

#[test]
fn rotated_type() {
    let renderer = SupportRenderer::default();
    let fork = MetalColumn::new(MetalSupportType::Fork, 32, ImageTemplate::default());
    let mut state = flat_tile();
    let mut sink = RecordingSink::new();
    assert!(renderer.metal_a_rotated(
        &mut state,
        &mut sink,
        TileSegment::Centre,
        Direction::South,
        &fork
    ));
    // ForkAlt has its own base
    assert_eq!(sink.image_indices()[0], 3298);
}

#[test]
fn side_by_side_on_odd_direction() {
    let renderer = SupportRenderer::default();
    let thick = MetalColumn::new(MetalSupportType::Thick, 16, ImageTemplate::default());
    let mut state = flat_tile();
    let mut sink = RecordingSink::new();
    assert!(renderer.supports_side_by_side(&mut state, &mut sink, Direction::North, &thick));
    // Thick seen from the north is ThickAlt
    assert_eq!(sink.image_indices(), vec![3175 + 15, 3175 + 15]);
    assert_eq!(sink.commands()[0].offset, CoordsXyz::new(4, 16, 0));
    assert_eq!(sink.commands()[1].offset, CoordsXyz::new(28, 16, 0));
    assert!(state.segments.get(TileSegment::TopRightSide).is_blocked());
    assert!(state.segments.get(TileSegment::BottomLeftSide).is_blocked());
    assert!(!state.segments.get(TileSegment::TopLeftSide).is_blocked());
}

#[test]
fn side_by_side_on_even_direction() {
    let renderer = SupportRenderer::default();
    let thick = MetalColumn::new(MetalSupportType::Thick, 16, ImageTemplate::default());
    let mut state = flat_tile();
    let mut sink = RecordingSink::new();
    assert!(renderer.supports_side_by_side(&mut state, &mut sink, Direction::East, &thick));
    assert_eq!(sink.image_indices(), vec![3141 + 15, 3141 + 15]);
    assert_eq!(sink.commands()[0].offset, CoordsXyz::new(16, 4, 0));
    assert_eq!(sink.commands()[1].offset, CoordsXyz::new(16, 28, 0));
}
