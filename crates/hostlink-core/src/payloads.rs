// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Payload shapes of the native method catalogue.
//
// Field names follow what the native apps parse (camelCase). Numeric enums go
// over the wire as plain integers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Declares an enum the native side expects as a bare integer, together with
/// its code mapping and serde impls, from a single variant list.
macro_rules! wire_int_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[repr(u8)]
        $vis enum $name {
            $($(#[$vmeta])* $variant = $value,)+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Integer value sent to the host.
            pub fn code(self) -> u8 {
                self as u8
            }

            pub fn from_code(code: u8) -> Option<Self> {
                match code {
                    $($value => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_u8(self.code())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let code = u8::deserialize(deserializer)?;
                Self::from_code(code).ok_or_else(|| {
                    serde::de::Error::custom(format!(
                        "invalid {} code {code}",
                        stringify!($name)
                    ))
                })
            }
        }
    };
}

wire_int_enum! {
    /// Which build of a WeChat mini program to open.
    pub enum MiniProgramType {
        Release = 0,
        Development = 1,
        Preview = 2,
    }
}

wire_int_enum! {
    /// What a share sheet carries. Decides which optional `Share` fields matter.
    pub enum ShareKind {
        Text = 0,
        Image = 1,
        WebPage = 2,
        Video = 3,
        MiniProgram = 4,
    }
}

wire_int_enum! {
    /// Promotion a shared activity item belongs to.
    pub enum GoodsType {
        FreeClaim = 0,
        FlashSale = 1,
    }
}

/// `launchMiniProgram`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchMiniProgram {
    /// Original id of the mini program (`gh_...`).
    pub user_name: String,
    /// Page path with query; empty opens the home page.
    pub path: String,
    pub miniprogram_type: MiniProgramType,
}

/// `payment`
///
/// The native side invokes `callback` once the payment sheet closes, passing
/// `order_no` back so the page can query the order status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub callback: String,
    /// Alipay, WeChat Pay, Panda Pay.
    pub pay_type: String,
    /// Opaque JSON string from the backend, parsed by native.
    pub pay_str: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_no: Option<String>,
}

/// `shareWith`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Share {
    #[serde(rename = "type")]
    pub kind: ShareKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Text body, or the description of a web page link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Image, or the thumbnail of a web page link.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
}

impl Share {
    /// Empty share of the given kind; fill fields with the builder methods.
    pub fn new(kind: ShareKind) -> Self {
        Self {
            kind,
            title: None,
            link: None,
            text: None,
            video_url: None,
            image_url: None,
            image_base64: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(ShareKind::Text).with_text(text)
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        Self::new(ShareKind::Image).with_image_url(url)
    }

    pub fn web_page(link: impl Into<String>, title: impl Into<String>) -> Self {
        Self::new(ShareKind::WebPage)
            .with_link(link)
            .with_title(title)
    }

    pub fn video(url: impl Into<String>) -> Self {
        Self::new(ShareKind::Video).with_video_url(url)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_video_url(mut self, url: impl Into<String>) -> Self {
        self.video_url = Some(url.into());
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_image_base64(mut self, data: impl Into<String>) -> Self {
        self.image_base64 = Some(data.into());
        self
    }
}

/// Payload of the operations that only name a callback
/// (`bindWeChat`, `getLocation`, `inviteFriends`, `inviteMembers`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackOnly {
    pub callback: String,
}

impl CallbackOnly {
    pub fn new(callback: impl Into<String>) -> Self {
        Self {
            callback: callback.into(),
        }
    }
}

/// `shareActivityGoods`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityGoods {
    pub goods_type: GoodsType,
    pub item_id: String,
}

/// `playADVideo`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdVideo {
    pub callback: String,
    pub view_token: String,
}

/// `sharePoster`
///
/// The poster is either fetched by native from `image_url` or passed inline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Poster {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn to_value<T: Serialize>(value: &T) -> serde_json::Value {
        serde_json::to_value(value).unwrap()
    }

    #[test]
    fn mini_program_wire_shape() {
        let payload = LaunchMiniProgram {
            user_name: "gh_abc".into(),
            path: "pages/index?id=1".into(),
            miniprogram_type: MiniProgramType::Preview,
        };
        assert_eq!(
            to_value(&payload),
            json!({"userName": "gh_abc", "path": "pages/index?id=1", "miniprogramType": 2})
        );
    }

    #[test]
    fn payment_omits_missing_order_no() {
        let payload = Payment {
            callback: "onPaid".into(),
            pay_type: "alipay".into(),
            pay_str: "{}".into(),
            order_no: None,
        };
        assert_eq!(
            to_value(&payload),
            json!({"callback": "onPaid", "payType": "alipay", "payStr": "{}"})
        );
    }

    #[test]
    fn share_sends_only_set_fields() {
        let share = Share::web_page("https://a.example", "Hello").with_text("desc");
        assert_eq!(
            to_value(&share),
            json!({"type": 2, "title": "Hello", "link": "https://a.example", "text": "desc"})
        );
    }

    #[test]
    fn activity_goods_codes() {
        let payload = ActivityGoods {
            goods_type: GoodsType::FlashSale,
            item_id: "42".into(),
        };
        assert_eq!(to_value(&payload), json!({"goodsType": 1, "itemId": "42"}));
    }

    #[test]
    fn out_of_range_code_is_rejected_on_decode() {
        let err = serde_json::from_str::<ShareKind>("7").unwrap_err();
        assert!(err.to_string().contains("invalid ShareKind code 7"));
        assert_eq!(ShareKind::from_code(4), Some(ShareKind::MiniProgram));
    }

    #[test]
    fn codes_and_variants_agree() {
        fn check<T: Copy + PartialEq + std::fmt::Debug>(
            all: &[T],
            code: fn(T) -> u8,
            from_code: fn(u8) -> Option<T>,
        ) {
            for &variant in all {
                assert_eq!(from_code(code(variant)), Some(variant));
            }
            let decodable = (0..=u8::MAX).filter(|c| from_code(*c).is_some()).count();
            assert_eq!(decodable, all.len());
        }

        check(MiniProgramType::ALL, MiniProgramType::code, MiniProgramType::from_code);
        check(ShareKind::ALL, ShareKind::code, ShareKind::from_code);
        check(GoodsType::ALL, GoodsType::code, GoodsType::from_code);
    }

    #[test]
    fn ad_video_uses_view_token_key() {
        let payload = AdVideo {
            callback: "onAd".into(),
            view_token: "t".into(),
        };
        assert_eq!(to_value(&payload), json!({"callback": "onAd", "viewToken": "t"}));
    }

    #[test]
    fn empty_poster_is_empty_object() {
        assert_eq!(to_value(&Poster::default()), json!({}));
    }
}
