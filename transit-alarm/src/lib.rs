//! Transit stop alarm.
//!
//! Pick a transit stop as your destination and get alerted when you come
//! within reach of it: "wake me up when the bus gets to my stop".

pub mod auth;
pub mod config;
pub mod controller;
pub mod domain;
pub mod geofence;
pub mod location;
pub mod notify;
pub mod stops;
pub mod ui;
pub mod web;
