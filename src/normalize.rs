// src/normalize.rs
//! Keyword normalization: symbol stripping, whitespace folding and a
//! pluggable script-substitution pass.
//!
//! The default pass ([`HanjaSubstitution`]) rewrites Hanja characters to their
//! Hangul reading, character by character. Coverage is a fixed table of the
//! characters that show up in Korean headlines: country and region
//! abbreviations, surnames and common given-name characters, and politics,
//! economy and society vocabulary. It is not a full dictionary. Characters
//! outside the table pass through unchanged, so a keyword spelled with a rare
//! Hanja fingerprints differently from its Hangul spelling. Readings do not
//! depend on the surrounding word.

use once_cell::sync::{Lazy, OnceCell};
use regex::Regex;
use std::collections::HashMap;

/// Pure text-to-text transliteration step.
pub trait Transliterate: Send + Sync {
    fn transliterate(&self, input: &str) -> String;
}

/// Leaves the input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Transliterate for Identity {
    fn transliterate(&self, input: &str) -> String {
        input.to_string()
    }
}

/// Substitutes each known Hanja character with its Hangul reading.
/// Unknown characters pass through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct HanjaSubstitution;

/// Hanja and Hangul reading pairs, grouped by topic. Characters with an initial
/// ㄹ or ㄴ use their word-initial reading (`李` is `이`, `老` is `노`).
/// `金` maps to the surname reading `김`.
const HANJA_TABLE: &[&str] = &[
    // countries and regions
    "韓한 中중 美미 日일 北북 南남 東동 西서 英영 獨독 佛불 伊이 印인 亞아 歐구 加가",
    "濠호 豪호 越월 泰태 比비 臺대 港항 滿만 蒙몽 洲주 阿아 朝조 鮮선 倭왜 蘇소 洋양",
    "外외 內내 國국 京경 都도 城성 村촌 邑읍 郡군 市시 道도 區구 省성 州주 島도 江강",
    "山산 川천 海해 湖호 峰봉 嶺영 半반",
    // surnames
    "金김 李이 朴박 崔최 鄭정 趙조 姜강 尹윤 張장 林임 吳오 徐서 申신 權권 黃황 宋송",
    "安안 柳유 劉유 洪홍 全전 高고 文문 孫손 梁양 裵배 白백 曺조 許허 沈심 盧노 丁정",
    "河하 郭곽 成성 車차 具구 禹우 朱주 任임 羅나 閔민 陳진 池지 嚴엄 元원 蔡채 千천",
    "方방 孔공 玄현 咸함 卞변 廉염 楊양 邊변 呂여 秋추 魯노 愼신 石석 宣선 薛설 馬마",
    "吉길 延연 表표 魏위 明명 奇기 潘반 王왕 琴금 玉옥 陸육 孟맹 諸제 卓탁 秦진 董동",
    "房방 余여 甘감 龍용 昌창 景경 承승 皮피 片편 睦목 殷은 庾유 慶경 邢형 晉진 韋위",
    // given names
    "寅인 在재 煥환 錫석 悅열 泳영 斗두 鉉현 植식 哲철 秀수 淑숙 姬희 俊준 浩호 永영",
    "善선 熙희 珍진 賢현 恩은 慧혜 敏민 宇우 虎호 雄웅 龜구 鎬호 洙수 淳순 珠주 順순",
    "惠혜 炅경 鍾종 範범 鎭진 奎규 彬빈 憲헌 勳훈 彦언 潤윤 允윤 昊호 祐우 禎정 燮섭",
    "炫현",
    // government and politics
    "與여 野야 靑청 青청 黨당 政정 府부 統통 領영 總총 理이 議의 員원 會회 選선 擧거",
    "投투 票표 官관 長장 院원 部부 局국 廳청 署서 處처 委위 職직 免면 辭사 退퇴 就취",
    "副부 次차 首수 相상 帝제 皇황 君군 臣신 民민 衆중 公공 共공 私사 主주 義의 派파",
    "系계 親친 反반 對대 改개 革혁 命명 法법 令영 律율 條조 例예 規규 案안 件건 制제",
    "度도 稅세 財재 豫예 算산",
    // law and security
    "檢검 察찰 警경 軍군 兵병 將장 隊대 艦함 砲포 彈탄 射사 擊격 爆폭 武무 器기 核핵",
    "侵침 攻공 防방 守수 衛위 戰전 亂난 鬪투 爭쟁 敵적 殺살 傷상 亡망 死사 罪죄 刑형",
    "罰벌 獄옥 逮체 捕포 拘구 束속 訴소 判판 決결 審심 調조 査사 搜수 押압 狀장 起기",
    "告고 犯범 疑의 惑혹 說설 密밀 諜첩 保보 危위 機기 險험 禁금 止지 可가",
    // economy
    "經경 濟제 株주 證증 券권 銀은 行행 錢전 價가 値치 物물 品품 賣매 買매 貸대 借차",
    "債채 負부 利이 益익 損손 失실 資자 本본 收수 支지 給급 賃임 庫고 企기 業업 産산",
    "貿무 易역 輸수 出출 入입 商상 社사 店점 場장 工공 農농 漁어 鐵철 船선 油유 電전",
    "氣기 原원 源원 能능 貨화 幣폐 換환 率율 信신 用용 額액 富부 貧빈",
    // society and culture
    "學학 校교 敎교 育육 試시 驗험 生생 病병 醫의 藥약 療요 患환 者자 疫역 感감 染염",
    "婦부 兒아 老노 少소 年연 歲세 代대 家가 族족 世세 界계 史사 父부 母모 兄형 弟제",
    "姉자 妹매 夫부 妻처 女여 男남 子자 人인 身신 心심 聖성 神신 宗종 寺사 堂당 祭제",
    "禮예 樂악 藝예 術술 字자 書서 冊책 詩시 歌가 舞무 映영 畫화 音음 劇극 球구 蹴축",
    "競경 技기 勝승 敗패 賞상 手수 監감 督독 優우 記기 錄녹 報보 聞문 新신 言언 論논",
    "媒매 體체 放방 送송 通통 話화 網망 星성 運운 動동 勞노 組조 協협 約약 定정 交교",
    "涉섭 談담 合합 意의 見견 問문 題제 事사 故고 災재 害해 環환 境경 溫온 暖난 風풍",
    "雨우 雪설 震진 波파 旱한 火화 水수",
    // numbers and time
    "一일 二이 三삼 四사 五오 六육 七칠 八팔 九구 十십 百백 萬만 億억 兆조 零영 兩양",
    "倍배 第제 號호 回회 月월 木목 土토 時시 分분 秒초 週주 今금 昨작 來내 再재 前전",
    "後후 初초 終종 末말 始시 現현 古고 舊구 春춘 夏하 冬동 夕석 夜야 晝주 午오",
    // common characters
    "大대 小소 多다 短단 低저 强강 弱약 上상 下하 左좌 右우 正정 好호 惡악 眞진 僞위",
    "醜추 最최 急급 速속 重중 輕경 深심 淺천 廣광 遠원 近근 開개 閉폐 不불 非비 無무",
    "有유 自자 由유 平평 和화 同동 各각 他타 其기 此차 習습 訪방 發발 走주 去거 歸귀",
    "往왕 落낙 登등 着착 到도 向향 進진 拒거 否부 認인 受수 授수 接접 待대 求구 救구",
    "助조 援원 持지 破파 壞괴 建건 設설 造조 作작 使사 治치 靜정 住주 食식 衣의 飮음",
    "酒주 茶차 米미 肉육 魚어 鳥조 牛우 犬견 花화 草초 樹수 色색 黑흑 赤적 紅홍 綠녹",
    "天천 地지 光광 暗암 寒한 熱열 冷냉 目목 口구 耳이 頭두 面면 血혈 足족 門문 室실",
    "館관 所소 空공 路노 橋교 驛역 站참 園원 宮궁 塔탑 壁벽",
];

static HANJA_READINGS: Lazy<HashMap<char, char>> = Lazy::new(|| {
    HANJA_TABLE
        .iter()
        .flat_map(|row| row.split_whitespace())
        .filter_map(|pair| {
            let mut chars = pair.chars();
            Some((chars.next()?, chars.next()?))
        })
        .collect()
});

impl Transliterate for HanjaSubstitution {
    fn transliterate(&self, input: &str) -> String {
        input
            .chars()
            .map(|c| HANJA_READINGS.get(&c).copied().unwrap_or(c))
            .collect()
    }
}

/// Normalize a raw keyword with the default Hanja substitution pass.
pub fn normalize_keyword(raw: &str) -> String {
    normalize_keyword_with(raw, &HanjaSubstitution)
}

/// Normalize a raw keyword:
/// 1) replace ignored symbols with a space
/// 2) fold whitespace runs into one space and trim
/// 3) transliterate
pub fn normalize_keyword_with<T: Transliterate + ?Sized>(raw: &str, translit: &T) -> String {
    static RE_SYMBOLS: OnceCell<Regex> = OnceCell::new();
    let re_symbols = RE_SYMBOLS
        .get_or_init(|| Regex::new(r"[!@#$%^&*()\[\]{};:,./<>?|`]").expect("symbol regex"));
    let out = re_symbols.replace_all(raw, " ");

    let folded = out.split_whitespace().collect::<Vec<_>>().join(" ");

    translit.transliterate(&folded)
}
