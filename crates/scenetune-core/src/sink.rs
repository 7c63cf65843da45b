//! Destination for applied tuning parameters.

use std::collections::BTreeMap;

/// Named encoder parameter written by the profile applier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    PreIntraLvl32CstWgt,
    PreIntraLvl16CstWgt,
    AtfSkipCimeThd,
    AtfIntraCimeThd,
    AtfSkipB64Wgt,
    AtfIntraB32Wgt,
    AtfSkipB32Wgt,
    AtfIntraB16Wgt,
    AtfSkipB16Wgt,
    AtfIntraB8Wgt,
    AtfSkipB8Wgt,
    PreIntraB32Cost,
    PreIntraB16Cost,
    MdSadThd,
    MadiThd,
    CimePmvSetZero,
    CimeMulti,
    RimeMulti,
    MoveLambda,
    RdoSegmentEn,
    RdoSmearEn,
    IntraLvl16SobelA,
    IntraLvl16SobelC,
    IntraLvl16SobelD,
    IntraLvl32SobelA,
    IntraLvl32SobelC,
    QntBiasI,
    QntBiasP,
    RimeCimeSadTh,
    FmeCimeSadPu16Th,
    FmeCimeSadPu32Th,
    FmeCimeSadPu64Th,
    ChromaKlutOffset,
}

impl Field {
    /// Every ATF field, skipped together when adaptive filtering is suppressed.
    pub const ADAPTIVE_FILTER: [Field; 9] = [
        Field::AtfSkipCimeThd,
        Field::AtfIntraCimeThd,
        Field::AtfSkipB64Wgt,
        Field::AtfIntraB32Wgt,
        Field::AtfSkipB32Wgt,
        Field::AtfIntraB16Wgt,
        Field::AtfSkipB16Wgt,
        Field::AtfIntraB8Wgt,
        Field::AtfSkipB8Wgt,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::PreIntraLvl32CstWgt => "pre_intra_lvl32_cst_wgt",
            Self::PreIntraLvl16CstWgt => "pre_intra_lvl16_cst_wgt",
            Self::AtfSkipCimeThd => "atf_skip_cime_thd",
            Self::AtfIntraCimeThd => "atf_intra_cime_thd",
            Self::AtfSkipB64Wgt => "atf_skip_b64_wgt",
            Self::AtfIntraB32Wgt => "atf_intra_b32_wgt",
            Self::AtfSkipB32Wgt => "atf_skip_b32_wgt",
            Self::AtfIntraB16Wgt => "atf_intra_b16_wgt",
            Self::AtfSkipB16Wgt => "atf_skip_b16_wgt",
            Self::AtfIntraB8Wgt => "atf_intra_b8_wgt",
            Self::AtfSkipB8Wgt => "atf_skip_b8_wgt",
            Self::PreIntraB32Cost => "pre_intra_b32_cost",
            Self::PreIntraB16Cost => "pre_intra_b16_cost",
            Self::MdSadThd => "md_sad_thd",
            Self::MadiThd => "madi_thd",
            Self::CimePmvSetZero => "cime_pmv_set_zero",
            Self::CimeMulti => "cime_multi",
            Self::RimeMulti => "rime_multi",
            Self::MoveLambda => "move_lambda",
            Self::RdoSegmentEn => "rdo_segment_en",
            Self::RdoSmearEn => "rdo_smear_en",
            Self::IntraLvl16SobelA => "intra_lvl16_sobel_a",
            Self::IntraLvl16SobelC => "intra_lvl16_sobel_c",
            Self::IntraLvl16SobelD => "intra_lvl16_sobel_d",
            Self::IntraLvl32SobelA => "intra_lvl32_sobel_a",
            Self::IntraLvl32SobelC => "intra_lvl32_sobel_c",
            Self::QntBiasI => "qnt_bias_i",
            Self::QntBiasP => "qnt_bias_p",
            Self::RimeCimeSadTh => "rime_cime_sad_th",
            Self::FmeCimeSadPu16Th => "fme_cime_sad_pu16_th",
            Self::FmeCimeSadPu32Th => "fme_cime_sad_pu32_th",
            Self::FmeCimeSadPu64Th => "fme_cime_sad_pu64_th",
            Self::ChromaKlutOffset => "chroma_klut_offset",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Receives the next frame's encoder parameters.
///
/// Implementors map fields onto whatever register or API layout the
/// encoder uses. Every write fully replaces the previous value.
pub trait ConfigSink {
    fn write(&mut self, field: Field, values: &[i32]);

    fn write_scalar(&mut self, field: Field, value: i32) {
        self.write(field, &[value]);
    }
}

/// In-memory sink that keeps the latest value of every field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordingSink {
    fields: BTreeMap<Field, Vec<i32>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<&[i32]> {
        self.fields.get(&field).map(Vec::as_slice)
    }

    pub fn scalar(&self, field: Field) -> Option<i32> {
        self.get(field).and_then(|v| v.first().copied())
    }

    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &[i32])> {
        self.fields.iter().map(|(f, v)| (*f, v.as_slice()))
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }
}

impl ConfigSink for RecordingSink {
    fn write(&mut self, field: Field, values: &[i32]) {
        self.fields.insert(field, values.to_vec());
    }
}
