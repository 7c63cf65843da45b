//! Sizing and allocation of the auxiliary QP and motion-flag maps used for
//! deblurring.

use tracing::{debug, info};

use crate::consts::{CTU_SIZE, MD_FLAG_BYTES, QPMAP_BASE_CFG_BYTES, QPMAP_QP_CFG_BYTES};
use crate::error::{Result, TuneError};

/// The auxiliary buffers a deblurring session needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuxMap {
    QpMapBaseCfg,
    QpMapQpCfg,
    MotionFlag,
}

impl AuxMap {
    pub const ALL: [AuxMap; 3] = [AuxMap::QpMapBaseCfg, AuxMap::QpMapQpCfg, AuxMap::MotionFlag];
}

impl std::fmt::Display for AuxMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QpMapBaseCfg => write!(f, "QP map base config"),
            Self::QpMapQpCfg => write!(f, "QP map QP config"),
            Self::MotionFlag => write!(f, "motion flag map"),
        }
    }
}

/// Byte sizes of every auxiliary map for one frame geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuxMapSizes {
    pub ctu_count: usize,
    pub qpmap_base_cfg: usize,
    pub qpmap_qp_cfg: usize,
    pub motion_flag: usize,
}

impl AuxMapSizes {
    pub fn for_frame(width: u32, height: u32) -> Self {
        let ctu_w = width.div_ceil(CTU_SIZE) as usize;
        let ctu_h = height.div_ceil(CTU_SIZE) as usize;
        let ctu_count = ctu_w * ctu_h;
        Self {
            ctu_count,
            qpmap_base_cfg: ctu_count * QPMAP_BASE_CFG_BYTES,
            qpmap_qp_cfg: ctu_count * QPMAP_QP_CFG_BYTES,
            motion_flag: ctu_count * MD_FLAG_BYTES,
        }
    }

    pub fn size_of(&self, map: AuxMap) -> usize {
        match map {
            AuxMap::QpMapBaseCfg => self.qpmap_base_cfg,
            AuxMap::QpMapQpCfg => self.qpmap_qp_cfg,
            AuxMap::MotionFlag => self.motion_flag,
        }
    }
}

/// Buffer provider for auxiliary maps.
pub trait BufferAllocator {
    /// Length of the buffer currently held for `map`, if any.
    fn allocated_len(&self, map: AuxMap) -> Option<usize>;

    /// Provide a zeroed buffer of `size` bytes for `map`, replacing any
    /// previous one.
    fn allocate(&mut self, map: AuxMap, size: usize) -> Result<()>;
}

/// Heap-backed allocator.
#[derive(Debug, Default)]
pub struct HeapAllocator {
    qpmap_base_cfg: Option<Vec<u8>>,
    qpmap_qp_cfg: Option<Vec<u8>>,
    motion_flag: Option<Vec<u8>>,
}

impl HeapAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self, map: AuxMap) -> Option<&[u8]> {
        self.slot(map).as_deref()
    }

    fn slot(&self, map: AuxMap) -> &Option<Vec<u8>> {
        match map {
            AuxMap::QpMapBaseCfg => &self.qpmap_base_cfg,
            AuxMap::QpMapQpCfg => &self.qpmap_qp_cfg,
            AuxMap::MotionFlag => &self.motion_flag,
        }
    }

    fn slot_mut(&mut self, map: AuxMap) -> &mut Option<Vec<u8>> {
        match map {
            AuxMap::QpMapBaseCfg => &mut self.qpmap_base_cfg,
            AuxMap::QpMapQpCfg => &mut self.qpmap_qp_cfg,
            AuxMap::MotionFlag => &mut self.motion_flag,
        }
    }
}

impl BufferAllocator for HeapAllocator {
    fn allocated_len(&self, map: AuxMap) -> Option<usize> {
        self.slot(map).as_ref().map(Vec::len)
    }

    fn allocate(&mut self, map: AuxMap, size: usize) -> Result<()> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(size)
            .map_err(|_| TuneError::Allocation { map, size })?;
        buf.resize(size, 0);
        *self.slot_mut(map) = Some(buf);
        Ok(())
    }
}

/// Make sure every auxiliary map can hold a `width`x`height` frame.
///
/// Missing or too-small buffers are (re)allocated; larger ones are kept.
/// Returns `None` without touching the allocator when deblurring is off.
pub fn prepare_aux_maps<A: BufferAllocator + ?Sized>(
    enabled: bool,
    width: u32,
    height: u32,
    allocator: &mut A,
) -> Result<Option<AuxMapSizes>> {
    if !enabled {
        info!("Deblurring disabled, auxiliary maps not allocated");
        return Ok(None);
    }

    let sizes = AuxMapSizes::for_frame(width, height);
    for map in AuxMap::ALL {
        let size = sizes.size_of(map);
        match allocator.allocated_len(map) {
            Some(len) if len >= size => continue,
            Some(len) => debug!(
                map = %map,
                from = len,
                to = size,
                "Auxiliary map too small, reallocating"
            ),
            None => {}
        }
        allocator.allocate(map, size)?;
        debug!(map = %map, size, "Auxiliary map allocated");
    }
    Ok(Some(sizes))
}
