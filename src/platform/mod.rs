//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame scheduling (requestAnimationFrame vs. host-driven)
//! - Resource loading (HtmlImageElement vs. immediate)

use crate::assets::AssetTable;

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Identifies one outstanding frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest(pub i32);

/// Host frame scheduler. At most one request is outstanding at a time.
pub trait FrameScheduler {
    /// Ask for one frame callback
    fn request_frame(&mut self) -> FrameRequest;

    /// Withdraw a request. A callback already dispatched may still arrive.
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// Scheduler driven by the caller: it only records what was asked of it
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    next_id: i32,
    pending: Option<FrameRequest>,
    /// Total frames requested
    pub requested: u32,
    /// Every request that was cancelled, in order
    pub cancelled: Vec<FrameRequest>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The request the host should fire next, if any
    pub fn pending(&self) -> Option<FrameRequest> {
        self.pending
    }

    /// Consume the pending request, as the host does when it fires a callback
    pub fn take_pending(&mut self) -> Option<FrameRequest> {
        self.pending.take()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameRequest {
        self.next_id += 1;
        let request = FrameRequest(self.next_id);
        self.pending = Some(request);
        self.requested += 1;
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.pending == Some(request) {
            self.pending = None;
        }
        self.cancelled.push(request);
    }
}

/// Callback fired once every requested resource is ready
pub type OnReady = Box<dyn FnOnce(AssetTable)>;

/// Loads drawable resources and reports once all of them are ready
pub trait ResourceLoader {
    fn load(&mut self, urls: &[String], on_ready: OnReady);
}

/// Loader with nothing to wait for: resolves handles in url order, synchronously
#[derive(Debug, Clone, Default)]
pub struct ImmediateLoader;

impl ResourceLoader for ImmediateLoader {
    fn load(&mut self, urls: &[String], on_ready: OnReady) {
        log::info!("{} resources ready", urls.len());
        on_ready(AssetTable::from_urls(urls));
    }
}
