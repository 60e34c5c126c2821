//! Integration suite modules.

mod chrome;
mod config;
mod contact;
mod fragments;
mod pointer;
mod reveal;
mod sequencing;
mod typewriter;
