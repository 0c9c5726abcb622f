#![allow(dead_code)]

pub mod sales_testkit;
