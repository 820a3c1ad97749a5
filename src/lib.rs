//! A skip list stores an ordered set of keys in a way that lets them be
//! efficiently searched, inserted and removed, all in `O(log(n))` on
//! average.
//!
//! Conceptually, the list is a fixed ladder of levels, each bounded by a
//! pair of sentinels (`*`), with every key on the bottom level and a
//! thinning random subset of the keys on each level above:
//!
//! ```text
//! * ----------------------------------------------> *
//! * ----------> [2] ------------------------------> *
//! * ----------> [2] ------------------> [7] ------> *
//! * --> [1] --> [2] ----------> [4] --> [7] ------> *
//! * --> [1] --> [2] --> [3] --> [4] --> [7] --> [9] *
//! ```
//!
//! Copies of the same key on consecutive levels are stitched into a
//! *tower*; searching descends the ladder from the top-left sentinel,
//! skipping ahead along each level before dropping down. How high each
//! tower reaches is decided at insertion time by flipping a
//! [coin][CoinFlipper], so the balancing is probabilistic rather than
//! structural, and the topmost level always stays empty as headroom for the
//! climb.
//!
//! Keys must have a total order (`Ord`); inserting a duplicate key or
//! removing an absent one is a silent no-op. The list performs no internal
//! synchronization: mutation requires `&mut SkipList`, and concurrent use
//! calls for external locking.

mod coin;
mod skiplist;
mod skipnode;

pub use coin::{BiasedCoin, CoinError, CoinFlipper, FairCoin};
pub use skiplist::{SkipList, MAX_HEIGHT};
