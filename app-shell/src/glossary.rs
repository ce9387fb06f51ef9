//! Built-in glossary of the terms the dashboard shows.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlossaryEntry {
    pub term: &'static str,
    pub short: &'static str,
    pub detail: &'static str,
    pub tags: &'static [&'static str],
}

impl GlossaryEntry {
    /// Case-insensitive substring match over term, summary, detail and tags.
    /// A blank query matches everything.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let hit = |s: &str| s.to_lowercase().contains(&needle);
        hit(self.term)
            || hit(self.short)
            || hit(self.detail)
            || self.tags.iter().any(|t| hit(t))
    }
}

pub static GLOSSARY: [GlossaryEntry; 13] = [
    GlossaryEntry {
        term: "SMA5",
        short: "Average close of the last 5 bars (short-term mean)",
        detail: "SMA5 is the mean closing price of the last 5 bars. The plan uses it as the \
                 mean-reversion target for TP1.",
        tags: &["SMA", "average", "TP1"],
    },
    GlossaryEntry {
        term: "SMA200",
        short: "Average close of the last 200 bars (long-term trend)",
        detail: "SMA200 is the mean closing price of the last 200 bars. It filters the long-term \
                 trend: price above SMA200 favours longs.",
        tags: &["SMA", "trend", "regime"],
    },
    GlossaryEntry {
        term: "RSI(2)",
        short: "Very short-term overbought/oversold gauge (2 bars)",
        detail: "RSI(2) measures up versus down strength over the last 2 bars. Longs look for \
                 RSI near 5 or below, shorts for RSI near 95 or above.",
        tags: &["RSI", "momentum"],
    },
    GlossaryEntry {
        term: "ATR(14)",
        short: "Volatility gauge (14 bars)",
        detail: "ATR(14) is the average true range of the last 14 bars, i.e. how far price \
                 typically swings per bar. Entry and stop distances are set as ATR multiples.",
        tags: &["ATR", "volatility"],
    },
    GlossaryEntry {
        term: "ATR%",
        short: "ATR relative to the current price",
        detail: "ATR% = ATR / price x 100. Too low means too little movement, too high means \
                 outsized risk; both lead to WAIT or a score penalty.",
        tags: &["ATR", "volatility"],
    },
    GlossaryEntry {
        term: "MDD",
        short: "Maximum drawdown from a running peak",
        detail: "MDD (max drawdown) is the largest fall of equity from its previous high during \
                 a backtest or live run. Lower is steadier.",
        tags: &["backtest", "risk"],
    },
    GlossaryEntry {
        term: "Fill rate",
        short: "Share of limit orders that actually filled",
        detail: "When entries use limit orders, this is the share that got executed. A low \
                 value means signals fire but orders rarely fill, so live results can differ.",
        tags: &["fill", "limit"],
    },
    GlossaryEntry {
        term: "R:R",
        short: "Reward relative to the stop distance",
        detail: "R:R compares the distance to the target with the distance to the stop. \
                 1.5 means aiming to make 1.5 for every 1 put at risk.",
        tags: &["risk", "reward-risk"],
    },
    GlossaryEntry {
        term: "Score",
        short: "Entry ease (how close conditions are to triggering)",
        detail: "Score says how easy it is to enter right now. It is high when the trigger is \
                 already met and low when price is still far from it.",
        tags: &["score"],
    },
    GlossaryEntry {
        term: "Comp",
        short: "Composite of entry ease, backtest and regime",
        detail: "Comp is the final ranking value used to choose a timeframe. It combines entry \
                 ease, the recent backtest result, the 1D regime and volatility conditions.",
        tags: &["score"],
    },
    GlossaryEntry {
        term: "Conf",
        short: "Recommendation confidence (0 to 100)",
        detail: "Conf condenses how good the current candidate looks into 0 to 100, reflecting \
                 entry ease, backtest and regime.",
        tags: &["score"],
    },
    GlossaryEntry {
        term: "BT",
        short: "Recent backtest result (normalised)",
        detail: "BT squeezes the recent backtest result into 0 to 1 for comparison. Higher means \
                 a better balance of return and drawdown lately.",
        tags: &["backtest"],
    },
    GlossaryEntry {
        term: "Regime",
        short: "1D long-term bias (long or short favoured)",
        detail: "Regime classifies the long-term trend by where the 1D close sits against \
                 SMA200. Trades against the regime are judged conservatively.",
        tags: &["regime", "SMA200"],
    },
];

/// Entries matching `query`, in table order.
pub fn filter(query: &str) -> Vec<&'static GlossaryEntry> {
    GLOSSARY.iter().filter(|e| e.matches(query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_query_returns_everything() {
        assert_eq!(filter("").len(), GLOSSARY.len());
        assert_eq!(filter("   ").len(), GLOSSARY.len());
    }

    #[test]
    fn tag_only_query_returns_tagged_entries() {
        for query in ["momentum", "MOMENTUM", "reward-risk"] {
            let tagged: Vec<_> = GLOSSARY
                .iter()
                .filter(|e| e.tags.iter().any(|t| t.eq_ignore_ascii_case(query)))
                .collect();
            assert!(!tagged.is_empty());
            assert_eq!(filter(query), tagged);
        }
        let terms: Vec<_> = filter("momentum").iter().map(|e| e.term).collect();
        assert_eq!(terms, ["RSI(2)"]);
    }

    #[test]
    fn query_searches_text_too() {
        let terms: Vec<_> = filter("volatil").iter().map(|e| e.term).collect();
        assert_eq!(terms, ["ATR(14)", "ATR%", "Comp"]);
        assert!(filter("no such thing").is_empty());
    }
}
