pub mod heap;
pub mod queue;
pub mod ring;
pub mod stack;

pub use heap::Heap;
pub use queue::Queue;
pub use ring::Ring;
pub use stack::Stack;
