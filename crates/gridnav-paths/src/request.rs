//! FIFO serialization of path requests.
//!
//! The queue guarantees that at most one search runs at a time and that
//! requests are dispatched in submission order. Because the search itself
//! is synchronous, completion order equals submission order too.

use std::collections::VecDeque;

use glam::Vec3;

use crate::astar::{PathResult, Pathfinder};

/// Completion callback, invoked exactly once with the finished result.
pub type PathCallback = Box<dyn FnOnce(PathResult)>;

/// A queued path request.
pub struct PathRequest {
    pub start: Vec3,
    pub end: Vec3,
    pub on_complete: PathCallback,
}

/// Serializes path requests over a single [`Pathfinder`].
///
/// Requests are held in a FIFO; whenever the queue is idle the head
/// request is dispatched, its search runs to completion, and its callback
/// fires before the next request starts. One in-flight search at a time is
/// enforced by the `processing` flag, no locking involved: dispatch and
/// completion happen on the same thread of control.
pub struct PathRequestQueue {
    pathfinder: Pathfinder,
    queue: VecDeque<PathRequest>,
    processing: bool,
}

impl PathRequestQueue {
    /// Create an idle queue around `pathfinder`.
    pub fn new(pathfinder: Pathfinder) -> Self {
        Self {
            pathfinder,
            queue: VecDeque::new(),
            processing: false,
        }
    }

    /// The pathfinder the queue dispatches to.
    pub fn pathfinder(&self) -> &Pathfinder {
        &self.pathfinder
    }

    /// Mutable access to the pathfinder (for grid updates between
    /// requests).
    pub fn pathfinder_mut(&mut self) -> &mut Pathfinder {
        &mut self.pathfinder
    }

    /// Number of requests still waiting to be dispatched.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Enqueue a path request from `start` to `end`.
    ///
    /// If no search is currently running the queue drains immediately:
    /// `on_complete` (and the callbacks of any requests queued behind it)
    /// fire synchronously, in submission order, before this call returns.
    pub fn request_path(
        &mut self,
        start: Vec3,
        end: Vec3,
        on_complete: impl FnOnce(PathResult) + 'static,
    ) {
        self.queue.push_back(PathRequest {
            start,
            end,
            on_complete: Box::new(on_complete),
        });
        self.process_next();
    }

    fn process_next(&mut self) {
        while !self.processing {
            let Some(request) = self.queue.pop_front() else {
                break;
            };
            self.processing = true;
            log::trace!("dispatching path request {} -> {}", request.start, request.end);
            let result = self.pathfinder.find_path(request.start, request.end);
            (request.on_complete)(result);
            self.processing = false;
        }
    }
}
