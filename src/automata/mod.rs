pub mod compiler;
pub mod nfa;
