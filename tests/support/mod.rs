#![allow(dead_code)]

pub mod graphs;
