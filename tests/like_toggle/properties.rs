//! Property tests for toggle/rollback symmetry.

use proptest::prelude::*;

use crate::fixtures::*;
use optimistic_cache::{LikeToggleController, Reply};

proptest! {
    #[test]
    fn apply_then_rollback_restores_exact_state(
        like_cnt in 0i64..10_000,
        is_like in any::<bool>(),
    ) {
        // A liked comment always has at least one like
        let like_cnt = if is_like { like_cnt.max(1) } else { like_cnt };
        let store = detail_and_all(1, like_cnt, is_like);
        let before = store.fingerprint().unwrap();
        let controller: LikeToggleController<_, Reply> = LikeToggleController::new(store.clone());

        let toggle = controller.apply_like_toggle(1, Some(0), BOOK).unwrap();
        let toggled = like_state(&scalar(&store, &detail_key(1)));
        prop_assert_eq!(toggled.0, !is_like);
        prop_assert_eq!((toggled.1 - like_cnt).abs(), 1);

        controller.rollback_like_toggle(toggle).unwrap();
        prop_assert_eq!(like_state(&scalar(&store, &detail_key(1))), (is_like, like_cnt));
        prop_assert_eq!(like_state(&item(&store, &all_key(), 1)), (is_like, like_cnt));
        prop_assert_eq!(store.fingerprint().unwrap(), before);
    }

    #[test]
    fn repeated_taps_roll_back_to_first_snapshot(taps in 1usize..6, like_cnt in 0i64..500) {
        let store = detail_and_all(1, like_cnt, false);
        let controller: LikeToggleController<_, Reply> = LikeToggleController::new(store.clone());

        let first = controller.apply_like_toggle(1, Some(0), BOOK).unwrap();
        for _ in 1..taps {
            let extra = controller.apply_like_toggle(1, Some(0), BOOK).unwrap();
            prop_assert!(extra.token.is_none());
        }

        controller.rollback_like_toggle(first).unwrap();
        prop_assert_eq!(like_state(&scalar(&store, &detail_key(1))), (false, like_cnt));
    }
}
