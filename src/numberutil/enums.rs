// Copyright (C) 2025 The Telnum Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use strum::EnumIter;

/// The canonical presentations a phone number can be formatted into.
///
/// `International` and `National` follow the ITU-T E.123 conventions of the
/// number's own region. For the Google Switzerland office number:
/// - **E164**: `+41446681800`
/// - **International**: `+41 44 668 1800`
/// - **National**: `044 668 1800`
/// - **Rfc3966**: `tel:+41-44-668-1800`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneNumberFormat {
    E164,
    International,
    National,
    Rfc3966,
}

/// Categorizes phone numbers by their primary use.
#[derive(Debug, EnumIter, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhoneNumberType {
    /// Traditional landline numbers tied to a geographic location.
    FixedLine,
    /// Numbers assigned to wireless devices.
    Mobile,
    /// Returned for regions (notably NANPA) where fixed-line and mobile
    /// numbers cannot be told apart by pattern.
    FixedLineOrMobile,
    /// Free for the caller; the recipient pays.
    TollFree,
    /// Charged above the normal rate (horoscopes, support lines, ...).
    PremiumRate,
    /// Cost split between caller and recipient.
    SharedCost,
    /// Voice-over-IP service numbers.
    VoIp,
    /// Numbers bound to a person and routed to wherever they configure.
    PersonalNumber,
    /// Paging devices.
    Pager,
    /// Universal access numbers routing into company departments.
    Uan,
    /// Direct voicemail access numbers.
    Voicemail,
    /// The number matches no known pattern of its region.
    Unknown,
}
