//! In-process API tests driving the router over the in-memory store

mod catalog;
mod customers;
mod games;
mod postgres;
mod rentals;
