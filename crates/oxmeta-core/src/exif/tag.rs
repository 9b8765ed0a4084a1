//! EXIF Tags
//!
//! Tag identifiers plus a static table describing the well-known tags:
//! their declared data type, shape and home directory. Tags missing from
//! the table are still read, kept and written; they simply carry whatever
//! type the directory entry declared.

use std::fmt;

use super::types::ExifDataType;

/// Directory an EXIF value lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExifIfd {
    /// IFD0, the primary image directory
    Primary,
    /// Exif sub-IFD (pointer tag 0x8769)
    Exif,
    /// GPS sub-IFD (pointer tag 0x8825)
    Gps,
    /// Interoperability sub-IFD inside the Exif IFD (pointer tag 0xA005)
    Interop,
    /// IFD1, describing the embedded thumbnail
    Thumbnail,
}

/// Number of elements a tag holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagShape {
    /// Exactly one element
    Scalar,
    /// Array with a fixed number of elements
    Fixed(usize),
    /// Array of any length
    Variable,
}

impl TagShape {
    pub fn is_array(self) -> bool {
        !matches!(self, Self::Scalar)
    }
}

/// Static description of a well-known tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagInfo {
    pub tag: ExifTag,
    pub name: &'static str,
    pub data_type: ExifDataType,
    pub shape: TagShape,
    pub ifd: ExifIfd,
}

/// EXIF tag identifier (16-bit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExifTag(pub u16);

impl ExifTag {
    /// Pointer to the Exif sub-IFD
    pub const EXIF_IFD_POINTER: Self = Self(0x8769);
    /// Pointer to the GPS sub-IFD
    pub const GPS_IFD_POINTER: Self = Self(0x8825);
    /// Pointer to the Interoperability sub-IFD
    pub const INTEROP_IFD_POINTER: Self = Self(0xA005);
    /// Offset of the JPEG thumbnail (IFD1)
    pub const JPEG_INTERCHANGE_FORMAT: Self = Self(0x0201);
    /// Length of the JPEG thumbnail (IFD1)
    pub const JPEG_INTERCHANGE_FORMAT_LENGTH: Self = Self(0x0202);
    /// Interoperability index; shares its number with GPS_LATITUDE_REF
    pub const INTEROPERABILITY_INDEX: Self = Self(0x0001);

    /// Look up the well-known description of this tag
    pub fn info(self) -> Option<&'static TagInfo> {
        KNOWN_TAGS.iter().find(|info| info.tag == self)
    }

    /// Well-known description of this tag as found in `ifd`
    ///
    /// IFD1 shares the IFD0 tag set. Numbers reused across directories, such
    /// as the low GPS numbers, only match in their own directory.
    pub fn info_in(self, ifd: ExifIfd) -> Option<&'static TagInfo> {
        let home = match ifd {
            ExifIfd::Thumbnail => ExifIfd::Primary,
            other => other,
        };
        KNOWN_TAGS
            .iter()
            .find(|info| info.tag == self && info.ifd == home)
    }

    /// Human readable name, if known
    pub fn name(self) -> Option<&'static str> {
        self.info().map(|info| info.name)
    }

    /// Tags that locate other structures and are regenerated on write
    pub fn is_structural(self) -> bool {
        matches!(
            self,
            Self::EXIF_IFD_POINTER
                | Self::GPS_IFD_POINTER
                | Self::INTEROP_IFD_POINTER
                | Self::JPEG_INTERCHANGE_FORMAT
                | Self::JPEG_INTERCHANGE_FORMAT_LENGTH
        )
    }
}

impl fmt::Display for ExifTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "0x{:04X}", self.0),
        }
    }
}

impl From<u16> for ExifTag {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

macro_rules! exif_tags {
    {$(
        $konst:ident $name:literal $val:literal $ty:ident $shape:expr, $ifd:ident;
    )*} => {
        impl ExifTag {
            $(
                pub const $konst: Self = Self($val);
            )*
        }

        /// Table of well-known tags
        pub static KNOWN_TAGS: &[TagInfo] = &[
            $(
                TagInfo {
                    tag: ExifTag($val),
                    name: $name,
                    data_type: ExifDataType::$ty,
                    shape: $shape,
                    ifd: ExifIfd::$ifd,
                },
            )*
        ];
    }
}

use TagShape::{Fixed, Scalar, Variable};

exif_tags! {
    // IFD0
    NEW_SUBFILE_TYPE "NewSubfileType" 0x00FE Long Scalar, Primary;
    IMAGE_WIDTH "ImageWidth" 0x0100 Long Scalar, Primary;
    IMAGE_LENGTH "ImageLength" 0x0101 Long Scalar, Primary;
    BITS_PER_SAMPLE "BitsPerSample" 0x0102 Short Variable, Primary;
    COMPRESSION "Compression" 0x0103 Short Scalar, Primary;
    PHOTOMETRIC_INTERPRETATION "PhotometricInterpretation" 0x0106 Short Scalar, Primary;
    IMAGE_DESCRIPTION "ImageDescription" 0x010E Ascii Scalar, Primary;
    MAKE "Make" 0x010F Ascii Scalar, Primary;
    MODEL "Model" 0x0110 Ascii Scalar, Primary;
    STRIP_OFFSETS "StripOffsets" 0x0111 Long Variable, Primary;
    ORIENTATION "Orientation" 0x0112 Short Scalar, Primary;
    SAMPLES_PER_PIXEL "SamplesPerPixel" 0x0115 Short Scalar, Primary;
    ROWS_PER_STRIP "RowsPerStrip" 0x0116 Long Scalar, Primary;
    STRIP_BYTE_COUNTS "StripByteCounts" 0x0117 Long Variable, Primary;
    X_RESOLUTION "XResolution" 0x011A Rational Scalar, Primary;
    Y_RESOLUTION "YResolution" 0x011B Rational Scalar, Primary;
    PLANAR_CONFIGURATION "PlanarConfiguration" 0x011C Short Scalar, Primary;
    RESOLUTION_UNIT "ResolutionUnit" 0x0128 Short Scalar, Primary;
    TRANSFER_FUNCTION "TransferFunction" 0x012D Short Variable, Primary;
    SOFTWARE "Software" 0x0131 Ascii Scalar, Primary;
    DATE_TIME "DateTime" 0x0132 Ascii Scalar, Primary;
    ARTIST "Artist" 0x013B Ascii Scalar, Primary;
    HOST_COMPUTER "HostComputer" 0x013C Ascii Scalar, Primary;
    WHITE_POINT "WhitePoint" 0x013E Rational Fixed(2), Primary;
    PRIMARY_CHROMATICITIES "PrimaryChromaticities" 0x013F Rational Fixed(6), Primary;
    Y_CB_CR_COEFFICIENTS "YCbCrCoefficients" 0x0211 Rational Fixed(3), Primary;
    Y_CB_CR_SUB_SAMPLING "YCbCrSubsampling" 0x0212 Short Fixed(2), Primary;
    Y_CB_CR_POSITIONING "YCbCrPositioning" 0x0213 Short Scalar, Primary;
    REFERENCE_BLACK_WHITE "ReferenceBlackWhite" 0x0214 Rational Fixed(6), Primary;
    RATING "Rating" 0x4746 Short Scalar, Primary;
    RATING_PERCENT "RatingPercent" 0x4749 Short Scalar, Primary;
    COPYRIGHT "Copyright" 0x8298 Ascii Scalar, Primary;
    XP_TITLE "XPTitle" 0x9C9B Byte Variable, Primary;
    XP_COMMENT "XPComment" 0x9C9C Byte Variable, Primary;
    XP_AUTHOR "XPAuthor" 0x9C9D Byte Variable, Primary;
    XP_KEYWORDS "XPKeywords" 0x9C9E Byte Variable, Primary;
    XP_SUBJECT "XPSubject" 0x9C9F Byte Variable, Primary;

    // Exif IFD
    EXPOSURE_TIME "ExposureTime" 0x829A Rational Scalar, Exif;
    F_NUMBER "FNumber" 0x829D Rational Scalar, Exif;
    EXPOSURE_PROGRAM "ExposureProgram" 0x8822 Short Scalar, Exif;
    SPECTRAL_SENSITIVITY "SpectralSensitivity" 0x8824 Ascii Scalar, Exif;
    ISO_SPEED_RATINGS "ISOSpeedRatings" 0x8827 Short Variable, Exif;
    SENSITIVITY_TYPE "SensitivityType" 0x8830 Short Scalar, Exif;
    EXIF_VERSION "ExifVersion" 0x9000 Undefined Fixed(4), Exif;
    DATE_TIME_ORIGINAL "DateTimeOriginal" 0x9003 Ascii Scalar, Exif;
    DATE_TIME_DIGITIZED "DateTimeDigitized" 0x9004 Ascii Scalar, Exif;
    OFFSET_TIME "OffsetTime" 0x9010 Ascii Scalar, Exif;
    OFFSET_TIME_ORIGINAL "OffsetTimeOriginal" 0x9011 Ascii Scalar, Exif;
    OFFSET_TIME_DIGITIZED "OffsetTimeDigitized" 0x9012 Ascii Scalar, Exif;
    COMPONENTS_CONFIGURATION "ComponentsConfiguration" 0x9101 Undefined Fixed(4), Exif;
    COMPRESSED_BITS_PER_PIXEL "CompressedBitsPerPixel" 0x9102 Rational Scalar, Exif;
    SHUTTER_SPEED_VALUE "ShutterSpeedValue" 0x9201 SignedRational Scalar, Exif;
    APERTURE_VALUE "ApertureValue" 0x9202 Rational Scalar, Exif;
    BRIGHTNESS_VALUE "BrightnessValue" 0x9203 SignedRational Scalar, Exif;
    EXPOSURE_BIAS_VALUE "ExposureBiasValue" 0x9204 SignedRational Scalar, Exif;
    MAX_APERTURE_VALUE "MaxApertureValue" 0x9205 Rational Scalar, Exif;
    SUBJECT_DISTANCE "SubjectDistance" 0x9206 Rational Scalar, Exif;
    METERING_MODE "MeteringMode" 0x9207 Short Scalar, Exif;
    LIGHT_SOURCE "LightSource" 0x9208 Short Scalar, Exif;
    FLASH "Flash" 0x9209 Short Scalar, Exif;
    FOCAL_LENGTH "FocalLength" 0x920A Rational Scalar, Exif;
    SUBJECT_AREA "SubjectArea" 0x9214 Short Variable, Exif;
    MAKER_NOTE "MakerNote" 0x927C Undefined Variable, Exif;
    USER_COMMENT "UserComment" 0x9286 Undefined Variable, Exif;
    SUBSEC_TIME "SubsecTime" 0x9290 Ascii Scalar, Exif;
    SUBSEC_TIME_ORIGINAL "SubsecTimeOriginal" 0x9291 Ascii Scalar, Exif;
    SUBSEC_TIME_DIGITIZED "SubsecTimeDigitized" 0x9292 Ascii Scalar, Exif;
    FLASHPIX_VERSION "FlashpixVersion" 0xA000 Undefined Fixed(4), Exif;
    COLOR_SPACE "ColorSpace" 0xA001 Short Scalar, Exif;
    PIXEL_X_DIMENSION "PixelXDimension" 0xA002 Long Scalar, Exif;
    PIXEL_Y_DIMENSION "PixelYDimension" 0xA003 Long Scalar, Exif;
    RELATED_SOUND_FILE "RelatedSoundFile" 0xA004 Ascii Scalar, Exif;
    FOCAL_PLANE_X_RESOLUTION "FocalPlaneXResolution" 0xA20E Rational Scalar, Exif;
    FOCAL_PLANE_Y_RESOLUTION "FocalPlaneYResolution" 0xA20F Rational Scalar, Exif;
    FOCAL_PLANE_RESOLUTION_UNIT "FocalPlaneResolutionUnit" 0xA210 Short Scalar, Exif;
    EXPOSURE_INDEX "ExposureIndex" 0xA215 Rational Scalar, Exif;
    SENSING_METHOD "SensingMethod" 0xA217 Short Scalar, Exif;
    FILE_SOURCE "FileSource" 0xA300 Undefined Fixed(1), Exif;
    SCENE_TYPE "SceneType" 0xA301 Undefined Fixed(1), Exif;
    CUSTOM_RENDERED "CustomRendered" 0xA401 Short Scalar, Exif;
    EXPOSURE_MODE "ExposureMode" 0xA402 Short Scalar, Exif;
    WHITE_BALANCE "WhiteBalance" 0xA403 Short Scalar, Exif;
    DIGITAL_ZOOM_RATIO "DigitalZoomRatio" 0xA404 Rational Scalar, Exif;
    FOCAL_LENGTH_IN_35MM_FILM "FocalLengthIn35mmFilm" 0xA405 Short Scalar, Exif;
    SCENE_CAPTURE_TYPE "SceneCaptureType" 0xA406 Short Scalar, Exif;
    GAIN_CONTROL "GainControl" 0xA407 Short Scalar, Exif;
    CONTRAST "Contrast" 0xA408 Short Scalar, Exif;
    SATURATION "Saturation" 0xA409 Short Scalar, Exif;
    SHARPNESS "Sharpness" 0xA40A Short Scalar, Exif;
    SUBJECT_DISTANCE_RANGE "SubjectDistanceRange" 0xA40C Short Scalar, Exif;
    IMAGE_UNIQUE_ID "ImageUniqueID" 0xA420 Ascii Scalar, Exif;
    CAMERA_OWNER_NAME "CameraOwnerName" 0xA430 Ascii Scalar, Exif;
    BODY_SERIAL_NUMBER "BodySerialNumber" 0xA431 Ascii Scalar, Exif;
    LENS_SPECIFICATION "LensSpecification" 0xA432 Rational Fixed(4), Exif;
    LENS_MAKE "LensMake" 0xA433 Ascii Scalar, Exif;
    LENS_MODEL "LensModel" 0xA434 Ascii Scalar, Exif;
    LENS_SERIAL_NUMBER "LensSerialNumber" 0xA435 Ascii Scalar, Exif;

    // GPS IFD
    GPS_VERSION_ID "GPSVersionID" 0x0000 Byte Fixed(4), Gps;
    GPS_LATITUDE_REF "GPSLatitudeRef" 0x0001 Ascii Scalar, Gps;
    GPS_LATITUDE "GPSLatitude" 0x0002 Rational Fixed(3), Gps;
    GPS_LONGITUDE_REF "GPSLongitudeRef" 0x0003 Ascii Scalar, Gps;
    GPS_LONGITUDE "GPSLongitude" 0x0004 Rational Fixed(3), Gps;
    GPS_ALTITUDE_REF "GPSAltitudeRef" 0x0005 Byte Scalar, Gps;
    GPS_ALTITUDE "GPSAltitude" 0x0006 Rational Scalar, Gps;
    GPS_TIMESTAMP "GPSTimestamp" 0x0007 Rational Fixed(3), Gps;
    GPS_SATELLITES "GPSSatellites" 0x0008 Ascii Scalar, Gps;
    GPS_STATUS "GPSStatus" 0x0009 Ascii Scalar, Gps;
    GPS_MEASURE_MODE "GPSMeasureMode" 0x000A Ascii Scalar, Gps;
    GPS_DOP "GPSDOP" 0x000B Rational Scalar, Gps;
    GPS_SPEED_REF "GPSSpeedRef" 0x000C Ascii Scalar, Gps;
    GPS_SPEED "GPSSpeed" 0x000D Rational Scalar, Gps;
    GPS_TRACK_REF "GPSTrackRef" 0x000E Ascii Scalar, Gps;
    GPS_TRACK "GPSTrack" 0x000F Rational Scalar, Gps;
    GPS_IMG_DIRECTION_REF "GPSImgDirectionRef" 0x0010 Ascii Scalar, Gps;
    GPS_IMG_DIRECTION "GPSImgDirection" 0x0011 Rational Scalar, Gps;
    GPS_MAP_DATUM "GPSMapDatum" 0x0012 Ascii Scalar, Gps;
    GPS_DATE_STAMP "GPSDateStamp" 0x001D Ascii Scalar, Gps;
    GPS_DIFFERENTIAL "GPSDifferential" 0x001E Short Scalar, Gps;
}
