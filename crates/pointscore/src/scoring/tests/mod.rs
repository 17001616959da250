mod common;
mod fswp;
