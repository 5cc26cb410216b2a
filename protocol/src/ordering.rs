//! Block ordering.
//!
//! A comparator is any `Fn(&Block, &Block) -> Ordering`. [`by_number`] is the
//! one the rest of the system uses. Ties are left in whatever order the sort
//! leaves them; [`sort_blocks`] happens to be stable, but nothing promises
//! more than number order.

use std::borrow::Borrow;
use std::cmp::Ordering;

use crate::block::Block;

/// A block comparator.
pub type BlockBy = fn(&Block, &Block) -> Ordering;

/// Ascending by header number.
pub fn by_number(a: &Block, b: &Block) -> Ordering {
    a.header().number.cmp(&b.header().number)
}

/// Sort any slice of owned or borrowed blocks with the given comparator.
pub fn sort_blocks<B, F>(blocks: &mut [B], mut by: F)
where
    B: Borrow<Block>,
    F: FnMut(&Block, &Block) -> Ordering,
{
    blocks.sort_by(|a, b| by(a.borrow(), b.borrow()));
}
