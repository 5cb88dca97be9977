// Property tests for drag candidates
// Random tasks and day displacements for each drag kind

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_taskgrid::gestures::{candidate_dates, CaptureGuard, DragGesture, DragKind, DragRelease};
use rust_taskgrid::grid::PointerPos;
use rust_taskgrid::models::task::{Task, TaskCategory};
use rust_taskgrid::utils::date::{add_days, days_inclusive};

const CELL_WIDTH: f32 = 50.0;

fn pointer_path() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-2000.0f32..2000.0, 1..40)
}

fn task_strategy() -> impl Strategy<Value = Task> {
    (0i64..3650, 1i64..60).prop_map(|(offset, days)| {
        let start = add_days(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(), offset);
        Task::new("t", "Task", TaskCategory::Todo, start, add_days(start, days - 1)).unwrap()
    })
}

proptest! {
    /// Property: resize-start keeps start at least a day before end
    #[test]
    fn prop_resize_start_keeps_gap(task in task_strategy(), days in -90i64..90) {
        prop_assume!(task.duration_days() > 1);
        let (start, end) = candidate_dates(&task, DragKind::ResizeStart, days).unwrap();
        prop_assert_eq!(end, task.end_date);
        prop_assert!(start <= add_days(end, -1));
    }

    /// Property: resize-end keeps end at least a day after start
    #[test]
    fn prop_resize_end_keeps_gap(task in task_strategy(), days in -90i64..90) {
        prop_assume!(task.duration_days() > 1);
        let (start, end) = candidate_dates(&task, DragKind::ResizeEnd, days).unwrap();
        prop_assert_eq!(start, task.start_date);
        prop_assert!(end >= add_days(start, 1));
    }

    /// Property: a move preserves duration and shifts both ends equally
    #[test]
    fn prop_move_preserves_duration(task in task_strategy(), days in -400i64..400) {
        let (start, end) = candidate_dates(&task, DragKind::Move, days).unwrap();
        prop_assert_eq!(days_inclusive(start, end), task.duration_days());
        prop_assert_eq!(start, add_days(task.start_date, days));
    }

    /// Property: no drag kind ever yields an inverted range
    #[test]
    fn prop_candidates_never_invert(task in task_strategy(), days in -90i64..90) {
        for kind in [DragKind::Move, DragKind::ResizeStart, DragKind::ResizeEnd] {
            if let Some((start, end)) = candidate_dates(&task, kind, days) {
                prop_assert!(start <= end);
            }
        }
    }

    /// Property: every step of a start-edge drag keeps the end fixed and the
    /// start at least a day before it
    #[test]
    fn prop_resize_start_path_keeps_gap(task in task_strategy(), path in pointer_path()) {
        prop_assume!(task.duration_days() > 1);
        let origin = PointerPos::new(0.0, 40.0);
        let mut gesture = DragGesture::default();
        gesture.pointer_down(task.clone(), DragKind::ResizeStart, origin, CaptureGuard::detached());

        for x in path {
            gesture.pointer_move(PointerPos::new(x, 40.0), CELL_WIDTH);
            if let Some(preview) = gesture.preview() {
                prop_assert_eq!(preview.end_date, task.end_date);
                prop_assert!(preview.start_date <= add_days(preview.end_date, -1));
            }
        }

        if let DragRelease::Commit { updated, .. } = gesture.pointer_up() {
            prop_assert_eq!(updated.end_date, task.end_date);
            prop_assert!(updated.start_date < updated.end_date);
        }
    }

    /// Property: every step of an end-edge drag keeps the start fixed and the
    /// end at least a day after it
    #[test]
    fn prop_resize_end_path_keeps_gap(task in task_strategy(), path in pointer_path()) {
        prop_assume!(task.duration_days() > 1);
        let origin = PointerPos::new(0.0, 40.0);
        let mut gesture = DragGesture::default();
        gesture.pointer_down(task.clone(), DragKind::ResizeEnd, origin, CaptureGuard::detached());

        for x in path {
            gesture.pointer_move(PointerPos::new(x, 40.0), CELL_WIDTH);
            if let Some(preview) = gesture.preview() {
                prop_assert_eq!(preview.start_date, task.start_date);
                prop_assert!(preview.end_date >= add_days(preview.start_date, 1));
            }
        }
    }
}
