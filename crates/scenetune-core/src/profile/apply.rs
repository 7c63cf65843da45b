//! Writes a selected profile into a [`ConfigSink`].

use crate::config::{QuantBiasOverride, TuneConfig};
use crate::consts::{
    ATF_INTRA_CIME_THRESHOLDS, ATF_SKIP_CIME_THRESHOLDS, MADI_THRESHOLDS, MD_SAD_THRESHOLDS,
    MOTION_MOVE_LAMBDA,
};
use crate::sink::{ConfigSink, Field};

use super::table::{AtfWeights, ProfileIndex, ProfileTable};

/// Per-frame inputs to the applier besides the profile itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Smoothed scene motion flag of the last completed frame.
    pub motion_flag: bool,
    pub quality_priority: bool,
    pub suppress_adaptive_filter: bool,
    pub qbias: Option<QuantBiasOverride>,
}

impl ApplyOptions {
    pub fn from_config(config: &TuneConfig, motion_flag: bool) -> Self {
        Self {
            motion_flag,
            quality_priority: config.quality_priority,
            suppress_adaptive_filter: config.suppress_adaptive_filter,
            qbias: config.qbias,
        }
    }
}

/// Overwrite the sink with profile `index`.
///
/// ATF fields are skipped entirely when adaptive filtering is suppressed.
/// An operator bias replaces the table pair.
pub fn apply_profile<S: ConfigSink + ?Sized>(
    table: &ProfileTable,
    index: ProfileIndex,
    options: &ApplyOptions,
    sink: &mut S,
) {
    let profile = table.get(index);
    let motion = options.motion_flag;

    sink.write(Field::PreIntraLvl32CstWgt, &profile.pre_intra.lvl32_cst_wgt);
    sink.write(Field::PreIntraLvl16CstWgt, &profile.pre_intra.lvl16_cst_wgt);

    if !options.suppress_adaptive_filter {
        write_atf(&profile.atf, sink);
    }

    sink.write(Field::PreIntraB32Cost, &profile.pre_intra.b32_cost);
    sink.write(Field::PreIntraB16Cost, &profile.pre_intra.b16_cost);

    sink.write(Field::MdSadThd, &MD_SAD_THRESHOLDS);
    sink.write(Field::MadiThd, &MADI_THRESHOLDS);

    let search = &profile.search;
    sink.write_scalar(Field::CimePmvSetZero, i32::from(!motion));
    sink.write(Field::CimeMulti, &search.cime_multi);
    sink.write(Field::RimeMulti, &search.rime_multi);
    if motion {
        sink.write_scalar(Field::MoveLambda, MOTION_MOVE_LAMBDA);
    }

    let segment = i32::from(!options.quality_priority && !motion);
    sink.write_scalar(Field::RdoSegmentEn, segment);
    sink.write_scalar(Field::RdoSmearEn, segment);

    let gradient = &profile.gradient;
    sink.write(Field::IntraLvl16SobelA, &gradient.lvl16_sobel_a);
    sink.write(Field::IntraLvl16SobelC, &gradient.lvl16_sobel_c);
    sink.write(Field::IntraLvl16SobelD, &gradient.lvl16_sobel_d);
    sink.write(Field::IntraLvl32SobelA, &gradient.lvl32_sobel_a);
    sink.write(Field::IntraLvl32SobelC, &gradient.lvl32_sobel_c);

    let (bias_i, bias_p) = match options.qbias {
        Some(bias) => bias.resolve(),
        None => (profile.qbias.intra, profile.qbias.inter),
    };
    sink.write_scalar(Field::QntBiasI, bias_i);
    sink.write_scalar(Field::QntBiasP, bias_p);

    sink.write_scalar(Field::RimeCimeSadTh, search.rime_cime_sad_th);
    sink.write_scalar(Field::FmeCimeSadPu16Th, search.fme_cime_sad_pu16_th);
    sink.write_scalar(Field::FmeCimeSadPu32Th, search.fme_cime_sad_pu32_th);
    sink.write_scalar(Field::FmeCimeSadPu64Th, search.fme_cime_sad_pu64_th);
    sink.write_scalar(Field::ChromaKlutOffset, profile.chroma_klut_offset);
}

fn write_atf<S: ConfigSink + ?Sized>(atf: &AtfWeights, sink: &mut S) {
    sink.write(Field::AtfSkipCimeThd, &ATF_SKIP_CIME_THRESHOLDS);
    sink.write(Field::AtfIntraCimeThd, &ATF_INTRA_CIME_THRESHOLDS);
    sink.write(Field::AtfSkipB64Wgt, &atf.skip_b64);
    sink.write(Field::AtfIntraB32Wgt, &atf.intra_b32);
    sink.write(Field::AtfSkipB32Wgt, &atf.skip_b32);
    sink.write(Field::AtfIntraB16Wgt, &atf.intra_b16);
    sink.write(Field::AtfSkipB16Wgt, &atf.skip_b16);
    sink.write(Field::AtfIntraB8Wgt, &atf.intra_b8);
    sink.write(Field::AtfSkipB8Wgt, &atf.skip_b8);
}
