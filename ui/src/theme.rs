pub const GLOBAL_CSS: &str = r#"
:root {
  --font-base: 16px;
  --bg: #05090f;
  --bg-elev-1: #0b111a;
  --bg-elev-2: #111a26;
  --panel: #0d1520;
  --border: rgba(255, 255, 255, 0.08);
  --border-strong: rgba(255, 255, 255, 0.16);
  --text: #e6edf7;
  --text-muted: #7f8ba0;
  --accent: #5cb0ff;
  --positive: #3fb68b;
  --negative: #f0635c;
  --warning: #f7c843;
  --surface-hover: rgba(255, 255, 255, 0.05);
  --shadow-soft: 0 14px 42px rgba(0, 0, 0, 0.38);
  --radius: 10px;
  --radius-pill: 999px;
  --font-body: "Inter", "SF Pro Text", system-ui, -apple-system, sans-serif;
  --font-mono: "JetBrains Mono", "SFMono-Regular", ui-monospace, monospace;
  --transition: 140ms ease-out;
}

* { box-sizing: border-box; }

html { font-size: var(--font-base); }

body {
  margin: 0;
  background: var(--bg);
  color: var(--text);
  font-family: var(--font-body);
  font-size: 1rem;
}

.wrap { max-width: 1280px; margin: 0 auto; padding: 0 1rem; }
.muted { color: var(--text-muted); }

.topBar {
  position: sticky;
  top: 0;
  z-index: 10;
  background: var(--bg-elev-1);
  border-bottom: 1px solid var(--border);
}
.topBarInner {
  display: flex;
  flex-wrap: wrap;
  align-items: center;
  justify-content: space-between;
  gap: 1rem;
  padding: 0.75rem 1rem;
}
.brandTitle { font-weight: 700; font-size: 1.2rem; }
.brandSub { font-size: 0.85rem; }
.topControls { display: flex; flex-wrap: wrap; align-items: center; gap: 0.5rem; }

.segmented {
  display: inline-flex;
  border: 1px solid var(--border-strong);
  border-radius: var(--radius);
  overflow: hidden;
}
.segBtn {
  background: transparent;
  color: var(--text);
  border: none;
  padding: 0.45rem 0.9rem;
  font-weight: 600;
  cursor: pointer;
}
.segBtnActiveLong { background: var(--positive); color: #04120c; }
.segBtnActiveShort { background: var(--negative); color: #1a0605; }

.inputGroup { display: flex; align-items: center; gap: 0.4rem; }
.inputLabel { font-size: 0.8rem; }
.numInput, .searchInput {
  background: var(--bg-elev-2);
  color: var(--text);
  border: 1px solid var(--border-strong);
  border-radius: var(--radius);
  padding: 0.4rem 0.6rem;
  font: inherit;
}
.numInput { width: 5.5rem; }
.searchInput { width: 100%; }

.btn {
  background: var(--bg-elev-2);
  color: var(--text);
  border: 1px solid var(--border-strong);
  border-radius: var(--radius);
  padding: 0.45rem 0.8rem;
  font: inherit;
  cursor: pointer;
  transition: background var(--transition);
}
.btn:hover:not(:disabled) { background: var(--surface-hover); }
.btn:disabled, .segBtn:disabled { opacity: 0.5; cursor: not-allowed; }
.btnPrimary { background: var(--accent); color: #03101c; border-color: var(--accent); }
.btnTiny { padding: 0.2rem 0.45rem; font-size: 0.8rem; }
.fontControls { display: flex; align-items: center; gap: 0.3rem; }
.fontValue { min-width: 2.8rem; text-align: center; font-size: 0.8rem; }

.statusRow { display: flex; flex-wrap: wrap; align-items: center; gap: 0.75rem; margin: 1rem 0; }
.statusItem { display: flex; align-items: center; gap: 0.5rem; font-size: 0.85rem; }
.statusLatest { margin-left: auto; }

.badge {
  display: inline-block;
  padding: 0.15rem 0.55rem;
  border-radius: var(--radius-pill);
  font-size: 0.75rem;
  font-weight: 700;
  background: var(--bg-elev-2);
  color: var(--text-muted);
}
.badgeLive { background: rgba(63, 182, 139, 0.18); color: var(--positive); }
.badgeWarn { background: rgba(247, 200, 67, 0.18); color: var(--warning); }
.badgeDanger { background: rgba(240, 99, 92, 0.18); color: var(--negative); }

.toast {
  margin-bottom: 0.75rem;
  padding: 0.6rem 0.9rem;
  border-radius: var(--radius);
  background: var(--bg-elev-2);
  border: 1px solid var(--border-strong);
}
.toastError { border-color: var(--negative); color: var(--negative); }

.layoutGrid { display: grid; grid-template-columns: minmax(0, 2fr) minmax(0, 1fr); gap: 1rem; }
@media (max-width: 960px) { .layoutGrid { grid-template-columns: 1fr; } }

.panel {
  background: var(--panel);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 1rem;
  box-shadow: var(--shadow-soft);
}
.rankingPanel { margin-top: 1rem; }
.panelHeader { display: flex; justify-content: space-between; align-items: flex-start; gap: 1rem; margin-bottom: 0.75rem; }
.panelTitle { font-weight: 700; }
.panelSub { font-size: 0.85rem; display: flex; flex-wrap: wrap; align-items: center; gap: 0.35rem; }
.panelFoot { font-size: 0.8rem; margin-top: 0.5rem; }

.pill {
  display: inline-flex;
  align-items: center;
  padding: 0.1rem 0.5rem;
  border-radius: var(--radius-pill);
  background: var(--bg-elev-2);
  border: 1px solid var(--border);
  font-size: 0.75rem;
}

.priceHeader { text-align: right; }
.priceNow { font-family: var(--font-mono); font-size: 1.4rem; font-weight: 700; }
.priceDelta { font-family: var(--font-mono); font-size: 0.9rem; }
.priceDelta.up { color: var(--positive); }
.priceDelta.down { color: var(--negative); }

.chartBox { height: 420px; border-radius: var(--radius); overflow: hidden; background: var(--bg-elev-1); }
.chartCanvas { display: block; width: 100%; height: 100%; }

.kpiGrid { display: grid; grid-template-columns: repeat(4, minmax(0, 1fr)); gap: 0.5rem; margin-top: 0.75rem; }
.kpi { background: var(--bg-elev-1); border-radius: var(--radius); padding: 0.6rem; font-size: 0.8rem; }
.kpiValue { font-family: var(--font-mono); font-size: 1.1rem; font-weight: 700; margin-top: 0.2rem; }
.kpiValue.ok { color: var(--positive); }
.kpiValue.wait { color: var(--warning); }

.notice {
  background: rgba(92, 176, 255, 0.08);
  border: 1px solid rgba(92, 176, 255, 0.25);
  border-radius: var(--radius);
  padding: 0.6rem;
  font-size: 0.85rem;
  margin-bottom: 0.75rem;
}

.priceGrid { display: grid; grid-template-columns: 1fr; gap: 0.5rem; }
.priceCard { background: var(--bg-elev-1); border-radius: var(--radius); padding: 0.6rem; font-size: 0.8rem; }
.priceValue { font-family: var(--font-mono); font-size: 1.2rem; font-weight: 700; margin: 0.2rem 0; }
.planMeta { margin-top: 0.75rem; display: grid; gap: 0.35rem; font-size: 0.85rem; }
.metaRow { display: flex; justify-content: space-between; gap: 0.5rem; }

.termLabel { display: inline-flex; align-items: center; gap: 0.25rem; }
.helpBtn {
  width: 1.1rem;
  height: 1.1rem;
  padding: 0;
  border-radius: 50%;
  border: 1px solid var(--border-strong);
  background: transparent;
  color: var(--text-muted);
  font-size: 0.7rem;
  line-height: 1;
  cursor: pointer;
}
.helpBtn:hover { color: var(--text); }

.tableScroll { overflow: auto; }
.table { width: 100%; border-collapse: collapse; font-size: 0.85rem; }
.table th, .table td { padding: 0.45rem 0.5rem; text-align: left; border-bottom: 1px solid var(--border); white-space: nowrap; }
.table tbody tr { cursor: pointer; }
.table tbody tr:hover { background: var(--surface-hover); }
.table tbody tr.rowActive { background: rgba(92, 176, 255, 0.12); }
.barWrap { width: 4rem; height: 0.45rem; border-radius: var(--radius-pill); background: var(--bg-elev-2); overflow: hidden; }
.barFill { height: 100%; background: var(--accent); }

.modalBackdrop {
  position: fixed;
  inset: 0;
  z-index: 100;
  display: flex;
  align-items: center;
  justify-content: center;
  background: rgba(0, 0, 0, 0.55);
}
.modal {
  width: min(720px, calc(100vw - 2rem));
  max-height: calc(100vh - 4rem);
  display: flex;
  flex-direction: column;
  background: var(--panel);
  border: 1px solid var(--border-strong);
  border-radius: var(--radius);
  box-shadow: var(--shadow-soft);
}
.modalHeader { display: flex; justify-content: space-between; align-items: center; padding: 0.8rem 1rem; border-bottom: 1px solid var(--border); }
.modalTitle { font-weight: 700; }
.modalBody { padding: 1rem; overflow: auto; display: grid; gap: 0.6rem; }
.iconBtn { background: transparent; border: none; color: var(--text-muted); font-size: 1.3rem; cursor: pointer; }
.iconBtn:hover { color: var(--text); }

.glossaryCount { font-size: 0.8rem; }
.glossaryList { display: grid; gap: 0.6rem; }
.glossaryItem { background: var(--bg-elev-1); border-radius: var(--radius); padding: 0.7rem; }
.glossaryTerm { display: flex; flex-wrap: wrap; gap: 0.5rem; align-items: baseline; }
.glossaryDetail { margin-top: 0.35rem; font-size: 0.9rem; line-height: 1.45; }
.glossaryTags { margin-top: 0.4rem; display: flex; flex-wrap: wrap; gap: 0.3rem; }
"#;
