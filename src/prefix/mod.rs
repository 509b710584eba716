pub mod radix;
pub mod trie;

pub use radix::Radix;
pub use trie::Trie;
