// =============================================================================
// BumpBoot — Multiboot (v1) Interface
// =============================================================================
//
// Two halves of the same contract:
//
//   HEADER (kernel -> bootloader)
//     Three 32-bit words in the first 8 KiB of the image: magic, flags,
//     checksum. The bootloader refuses the image unless
//     magic + flags + checksum == 0 (mod 2^32).
//
//   INFO BLOCK (bootloader -> kernel)
//     On entry EAX holds 0x2BADB002 and EBX the physical address of an info
//     block. Which fields are valid is announced by bits in its first word.
//
// =============================================================================

use bitflags::bitflags;

/// Magic the header starts with.
pub const HEADER_MAGIC: u32 = 0x1BAD_B002;

/// Magic a compliant bootloader leaves in EAX.
pub const BOOTLOADER_MAGIC: u32 = 0x2BAD_B002;

bitflags! {
    /// Features the kernel asks the bootloader for.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct HeaderFlags: u32 {
        /// Load modules on 4 KiB boundaries.
        const PAGE_ALIGN = 1 << 0;
        /// Fill in `mem_lower` / `mem_upper` (and the memory map).
        const MEMORY_INFO = 1 << 1;
        /// Fill in the video mode table.
        const VIDEO_MODE = 1 << 2;
        /// Load addresses come from the header, not the ELF headers.
        const AOUT_KLUDGE = 1 << 16;
    }
}

bitflags! {
    /// Which fields of the info block are valid.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct InfoFlags: u32 {
        const MEMORY = 1 << 0;
        const BOOT_DEVICE = 1 << 1;
        const CMDLINE = 1 << 2;
        const MODULES = 1 << 3;
        const MEMORY_MAP = 1 << 6;
        const BOOTLOADER_NAME = 1 << 9;
    }
}

/// The boot-compatibility header, bit-for-bit as the bootloader scans it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C, align(4))]
pub struct MultibootHeader {
    pub magic: u32,
    pub flags: u32,
    pub checksum: u32,
}

impl MultibootHeader {
    pub const fn new(flags: HeaderFlags) -> Self {
        Self {
            magic: HEADER_MAGIC,
            flags: flags.bits(),
            checksum: 0u32.wrapping_sub(HEADER_MAGIC.wrapping_add(flags.bits())),
        }
    }

    /// Whether the three words sum to zero, as the bootloader checks.
    pub const fn is_valid(&self) -> bool {
        self.magic == HEADER_MAGIC
            && self.magic.wrapping_add(self.flags).wrapping_add(self.checksum) == 0
    }
}

/// Header flags this kernel requests: page-aligned modules and memory info.
pub const KERNEL_HEADER_FLAGS: HeaderFlags = HeaderFlags::PAGE_ALIGN.union(HeaderFlags::MEMORY_INFO);

#[cfg(target_os = "none")]
#[used]
#[unsafe(link_section = ".multiboot")]
static HEADER: MultibootHeader = MultibootHeader::new(KERNEL_HEADER_FLAGS);

/// Leading fields of the info block; only the ones this kernel reads.
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct MultibootInfo {
    pub flags: u32,
    /// KiB of conventional memory below 1 MiB.
    pub mem_lower: u32,
    /// KiB of memory above 1 MiB, up to the first hole.
    pub mem_upper: u32,
}

/// What the bootloader told us, if anything usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootHandoff {
    /// EAX did not hold the multiboot magic; the info pointer is garbage.
    Unknown { magic: u32 },
    /// Multiboot-compliant loader, with memory sizes in KiB when provided.
    Multiboot { lower_kib: Option<u32>, upper_kib: Option<u32> },
}

/// Interpret the registers the entry trampoline passed on.
///
/// # Safety
/// When `magic` is [`BOOTLOADER_MAGIC`], `info` must be zero or point to a
/// readable multiboot info block.
pub unsafe fn parse_handoff(magic: u32, info: usize) -> BootHandoff {
    if magic != BOOTLOADER_MAGIC {
        return BootHandoff::Unknown { magic };
    }
    if info == 0 {
        return BootHandoff::Multiboot { lower_kib: None, upper_kib: None };
    }

    // SAFETY: caller guarantees a valid info block behind a correct magic.
    let block = unsafe { (info as *const MultibootInfo).read_unaligned() };
    let flags = InfoFlags::from_bits_truncate(block.flags);
    if flags.contains(InfoFlags::MEMORY) {
        BootHandoff::Multiboot {
            lower_kib: Some(block.mem_lower),
            upper_kib: Some(block.mem_upper),
        }
    } else {
        BootHandoff::Multiboot { lower_kib: None, upper_kib: None }
    }
}

/// Log the hand-off the way the serial console expects it.
pub fn report(handoff: &BootHandoff) {
    match *handoff {
        BootHandoff::Unknown { magic } => {
            log::warn!("not loaded by a multiboot loader (eax = {:#010X})", magic);
        }
        BootHandoff::Multiboot { lower_kib: Some(lower), upper_kib: Some(upper) } => {
            log::info!("multiboot: {} KiB lower, {} KiB upper memory", lower, upper);
        }
        BootHandoff::Multiboot { .. } => {
            log::info!("multiboot: no memory information");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_matches_published_words() {
        let header = MultibootHeader::new(KERNEL_HEADER_FLAGS);
        assert_eq!(header.magic, 0x1BAD_B002);
        assert_eq!(header.flags, 0x0000_0003);
        assert_eq!(header.checksum, 0xE452_4FFB);
        assert!(header.is_valid());
    }

    #[test]
    fn header_layout_is_three_words() {
        assert_eq!(core::mem::size_of::<MultibootHeader>(), 12);
        assert_eq!(core::mem::align_of::<MultibootHeader>(), 4);
    }

    #[test]
    fn checksum_holds_for_any_flags() {
        for flags in [HeaderFlags::empty(), HeaderFlags::all(), HeaderFlags::VIDEO_MODE] {
            assert!(MultibootHeader::new(flags).is_valid());
        }
    }

    #[test]
    fn tampered_header_is_invalid() {
        let mut header = MultibootHeader::new(KERNEL_HEADER_FLAGS);
        header.flags |= HeaderFlags::VIDEO_MODE.bits();
        assert!(!header.is_valid());
    }

    #[test]
    fn wrong_magic_is_unknown_loader() {
        let handoff = unsafe { parse_handoff(0xDEAD_BEEF, 0x1234) };
        assert_eq!(handoff, BootHandoff::Unknown { magic: 0xDEAD_BEEF });
    }

    #[test]
    fn memory_sizes_read_when_flagged() {
        let block = MultibootInfo { flags: InfoFlags::MEMORY.bits(), mem_lower: 639, mem_upper: 130_048 };
        let handoff = unsafe { parse_handoff(BOOTLOADER_MAGIC, &block as *const _ as usize) };
        assert_eq!(handoff, BootHandoff::Multiboot { lower_kib: Some(639), upper_kib: Some(130_048) });
    }

    #[test]
    fn memory_sizes_ignored_when_not_flagged() {
        let block = MultibootInfo { flags: InfoFlags::CMDLINE.bits(), mem_lower: 1, mem_upper: 2 };
        let handoff = unsafe { parse_handoff(BOOTLOADER_MAGIC, &block as *const _ as usize) };
        assert_eq!(handoff, BootHandoff::Multiboot { lower_kib: None, upper_kib: None });
    }

    #[test]
    fn null_info_pointer_is_tolerated() {
        let handoff = unsafe { parse_handoff(BOOTLOADER_MAGIC, 0) };
        assert_eq!(handoff, BootHandoff::Multiboot { lower_kib: None, upper_kib: None });
    }
}
