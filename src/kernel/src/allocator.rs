//! Kernel heap allocation.
//!
//! The heap is sized for what EdgeOS keeps alive from boot on: the FAT12
//! volume the shell formats, the console's scroll-back ring, and a margin
//! for the key mailbox, command history and per-command buffers.

use core::mem::size_of;

use edgeos_common::{ScreenCell, TEXT_CELLS};
use edgeos_console::MAXIMUM_PAGES;
use edgeos_shell::fs::fat12::IMAGE_SIZE;
use linked_list_allocator::LockedHeap;
use x86_64::{
    structures::paging::{
        mapper::MapToError, FrameAllocator, Mapper, Page, PageTableFlags, Size4KiB,
    },
    VirtAddr,
};

/// The start address of the kernel heap.
pub const HEAP_START: usize = 0x_4444_4444_0000;

/// Snapshots held by the console for scroll-back.
const PAGE_RING_BYTES: usize = MAXIMUM_PAGES * TEXT_CELLS * size_of::<ScreenCell>();

/// Mailbox, history and line buffers, plus slack for fragmentation.
const MARGIN_BYTES: usize = 1024 * 1024;

/// The size of the kernel heap, rounded up to whole pages.
pub const HEAP_SIZE: usize = (IMAGE_SIZE + PAGE_RING_BYTES + MARGIN_BYTES + 0xFFF) & !0xFFF;

#[cfg_attr(not(test), global_allocator)]
static ALLOCATOR: LockedHeap = LockedHeap::empty();

/// Maps the heap pages and hands them to the global allocator.
///
/// Fails if the boot memory map runs out of frames.
pub fn init_heap(
    mapper: &mut impl Mapper<Size4KiB>,
    frame_allocator: &mut impl FrameAllocator<Size4KiB>,
) -> Result<(), MapToError<Size4KiB>> {
    let page_range = {
        let heap_start = VirtAddr::new(HEAP_START as u64);
        let heap_end = heap_start + HEAP_SIZE - 1u64;
        let heap_start_page = Page::containing_address(heap_start);
        let heap_end_page = Page::containing_address(heap_end);
        Page::range_inclusive(heap_start_page, heap_end_page)
    };

    for page in page_range {
        let frame = frame_allocator
            .allocate_frame()
            .ok_or(MapToError::FrameAllocationFailed)?;
        let flags = PageTableFlags::PRESENT | PageTableFlags::WRITABLE;
        // SAFETY: each frame is fresh from the boot memory map, and nothing
        // else maps [HEAP_START, HEAP_START + HEAP_SIZE).
        unsafe {
            mapper.map_to(page, frame, flags, frame_allocator)?.flush();
        }
    }

    // SAFETY: the whole range was mapped writable above, and `kernel_main`
    // calls this once before anything allocates.
    unsafe {
        ALLOCATOR.lock().init(HEAP_START as *mut u8, HEAP_SIZE);
    }

    log::info!("heap: {} KiB at {:#x}", HEAP_SIZE / 1024, HEAP_START);
    Ok(())
}
