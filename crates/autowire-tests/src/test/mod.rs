mod find;
mod hooks;
mod phase;
