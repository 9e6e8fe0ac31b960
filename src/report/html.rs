//! HTML report generation with D3.js visualizations
//!
//! Renders the whole page from one [`PageModel`]: site chrome, summary
//! tiles, the two bar charts, and the annotated timeline. The chart
//! descriptions are embedded as JSON and drawn client-side; the D3 code
//! only reads what the descriptions carry (domains, ticks, labels, tooltip
//! fields, annotations) and never recomputes chart semantics.

use crate::data::ApostlesData;
use crate::report::PageModel;
use chrono::DateTime;
use std::io::{self, Write};

pub fn write<W: Write>(writer: &mut W, data: &ApostlesData) -> io::Result<()> {
    let page = PageModel::compose(data);
    let page_json = serde_json::to_string(&page)?;

    write!(
        writer,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Prophet Calculator | LatterDay Tools</title>
    <script src="https://d3js.org/d3.v7.min.js"></script>
    <style>
        :root {{
            --bg: #f9fafb;
            --card: #ffffff;
            --border: #e5e7eb;
            --text: #111827;
            --dim: #6b7280;
            --faint: #9ca3af;
            --brand: #1e3a8a;
            --accent: #2563eb;
            --info-bg: #eff6ff;
            --warn-bg: #fefce8;
            --warn-border: #ca8a04;
        }}
        * {{ box-sizing: border-box; margin: 0; padding: 0; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif;
            background: var(--bg);
            color: var(--text);
            line-height: 1.5;
        }}
        .container {{ max-width: 1200px; margin: 0 auto; padding: 0 1rem; }}

        /* Site header */
        .site-header {{
            background: var(--card);
            border-bottom: 1px solid var(--border);
            padding: 1rem 0;
        }}
        .site-header .inner {{
            display: flex;
            align-items: center;
            justify-content: space-between;
        }}
        .brand {{ display: flex; align-items: center; gap: 0.5rem; text-decoration: none; }}
        .brand-mark {{
            width: 40px;
            height: 40px;
            display: flex;
            align-items: center;
            justify-content: center;
            border-radius: 8px;
            background: linear-gradient(135deg, #2563eb, #1e40af);
            color: #fff;
            font-weight: 700;
            font-size: 1.1rem;
        }}
        .brand-name {{ font-weight: 700; color: var(--text); }}
        .brand-tag {{ font-size: 0.75rem; color: var(--dim); }}
        .nav {{ display: flex; gap: 1.5rem; }}
        .nav a {{
            font-size: 0.875rem;
            font-weight: 500;
            color: var(--dim);
            text-decoration: none;
        }}
        .nav a:hover {{ color: var(--accent); }}
        .nav a.active {{ color: var(--accent); }}
        .nav .soon {{
            opacity: 0.5;
            cursor: not-allowed;
        }}
        .nav .soon-badge {{
            margin-left: 0.25rem;
            font-size: 0.7rem;
            background: var(--border);
            padding: 0.1rem 0.4rem;
            border-radius: 4px;
        }}

        /* Page header */
        .page-header {{ text-align: center; margin: 3rem 0; }}
        .page-header h1 {{ font-size: 2.25rem; color: var(--brand); margin-bottom: 0.5rem; }}
        .page-header .lede {{ font-size: 1.1rem; color: var(--dim); }}
        .page-header .updated {{ font-size: 0.875rem; color: var(--faint); margin-top: 0.5rem; }}

        /* Info box */
        .info-box {{
            background: var(--info-bg);
            border-left: 4px solid var(--brand);
            border-radius: 6px;
            padding: 1.5rem;
            margin-bottom: 2rem;
        }}
        .info-box h2 {{ font-size: 1.1rem; color: var(--brand); margin-bottom: 0.5rem; }}
        .info-box p {{ color: #374151; }}

        /* Chart cards */
        .charts {{
            display: grid;
            grid-template-columns: 1fr 1fr;
            gap: 2rem;
            margin-bottom: 2rem;
        }}
        .chart-card {{
            background: var(--card);
            border: 1px solid var(--border);
            border-radius: 8px;
            box-shadow: 0 1px 3px rgba(0,0,0,0.08);
            padding: 1.5rem;
        }}
        .chart-card.wide {{ grid-column: 1 / -1; }}
        .chart-title {{ font-size: 1.1rem; font-weight: 700; text-align: center; margin-bottom: 0.25rem; }}
        .chart-subtitle {{ font-size: 0.875rem; color: var(--dim); text-align: center; margin-bottom: 1.5rem; }}
        @media (max-width: 900px) {{
            .charts {{ grid-template-columns: 1fr; }}
        }}

        /* Summary tiles */
        .tiles {{
            display: grid;
            grid-template-columns: repeat(3, 1fr);
            gap: 1.5rem;
            margin-bottom: 2rem;
        }}
        .tile {{
            background: var(--card);
            border: 1px solid var(--border);
            border-radius: 8px;
            box-shadow: 0 1px 3px rgba(0,0,0,0.08);
            padding: 1.5rem;
            text-align: center;
        }}
        .tile-value {{ font-size: 2rem; font-weight: 700; color: var(--brand); }}
        .tile-label {{ color: var(--dim); margin-top: 0.25rem; }}

        /* Disclaimer */
        .disclaimer {{
            background: var(--warn-bg);
            border-left: 4px solid var(--warn-border);
            border-radius: 6px;
            padding: 1.5rem;
            margin-bottom: 3rem;
            color: #374151;
        }}

        /* Legend */
        .legend {{
            display: flex;
            flex-wrap: wrap;
            justify-content: center;
            gap: 0.75rem 1.25rem;
            margin-top: 0.75rem;
            font-size: 0.75rem;
        }}
        .legend-item {{ display: flex; align-items: center; gap: 0.4rem; color: var(--dim); }}
        .legend-dot {{ width: 10px; height: 10px; border-radius: 50%; }}

        /* Site footer */
        .site-footer {{
            background: var(--bg);
            border-top: 1px solid var(--border);
            padding: 2rem 0;
        }}
        .footer-grid {{
            display: grid;
            grid-template-columns: 2fr 1fr 1fr;
            gap: 2rem;
        }}
        .footer-grid h3 {{ font-size: 0.95rem; margin-bottom: 0.75rem; }}
        .footer-grid p {{ font-size: 0.875rem; color: var(--dim); max-width: 28rem; }}
        .footer-grid ul {{ list-style: none; }}
        .footer-grid li {{ margin-bottom: 0.5rem; }}
        .footer-grid a {{ font-size: 0.875rem; color: var(--dim); text-decoration: none; }}
        .footer-grid a:hover {{ color: var(--accent); }}
        .footer-bottom {{
            display: flex;
            justify-content: space-between;
            border-top: 1px solid var(--border);
            margin-top: 2rem;
            padding-top: 1.5rem;
            font-size: 0.75rem;
            color: var(--faint);
        }}
        .footer-bottom a {{ color: var(--faint); text-decoration: none; margin-left: 1.5rem; }}
        @media (max-width: 700px) {{
            .footer-grid {{ grid-template-columns: 1fr; }}
            .tiles {{ grid-template-columns: 1fr; }}
        }}

        /* Tooltip */
        .tooltip {{
            position: absolute;
            background: var(--card);
            border: 1px solid var(--border);
            border-radius: 8px;
            box-shadow: 0 4px 12px rgba(0,0,0,0.15);
            padding: 0.75rem 1rem;
            font-size: 0.8rem;
            pointer-events: none;
            opacity: 0;
            transition: opacity 0.15s;
            z-index: 1000;
            max-width: 18rem;
        }}
        .tooltip.visible {{ opacity: 1; }}
        .tooltip .tip-head {{ font-weight: 700; margin-bottom: 0.25rem; }}
        .tooltip .tip-row b {{ font-weight: 600; }}
    </style>
</head>
<body>
    <header class="site-header">
        <div class="container inner">
            <a class="brand" href="https://latterdaytools.io">
                <div class="brand-mark">LDT</div>
                <div>
                    <div class="brand-name">LatterDay Tools</div>
                    <div class="brand-tag">Data-driven insights</div>
                </div>
            </a>
            <nav class="nav">
                <a href="https://latterdaytools.io">Home</a>
                <a class="active" href="https://prophet.latterdaytools.io">Prophet Calculator</a>
                <a href="https://temples.latterdaytools.io">Temple Tracker</a>
                <a class="soon" href="https://conference.latterdaytools.io" aria-disabled="true">Conference Analytics<span class="soon-badge">Soon</span></a>
            </nav>
        </div>
    </header>

    <main class="container">
        <div class="page-header">
            <h1>Prophet Probability Tracker</h1>
            <p class="lede">Statistical analysis of succession probabilities in the Quorum of the Twelve Apostles</p>
            <p class="updated">Last updated: {generated}</p>
        </div>

        <div class="info-box">
            <h2>About This Tool</h2>
            <p>This report uses actuarial science and Monte Carlo simulation ({runs} runs) to estimate
            the probability that each apostle will eventually become President of The Church of Jesus
            Christ of Latter-day Saints. Calculations are based on current ages, seniority
            (ordination dates), and CDC life expectancy data.</p>
        </div>

        <div class="charts">
            <div class="chart-card">
                <div class="chart-title" id="age-title"></div>
                <div class="chart-subtitle" id="age-subtitle"></div>
                <div id="age-chart"></div>
            </div>
            <div class="chart-card">
                <div class="chart-title" id="probability-title"></div>
                <div class="chart-subtitle" id="probability-subtitle"></div>
                <div id="probability-chart"></div>
            </div>
            <div class="chart-card wide">
                <div class="chart-title" id="timeline-title"></div>
                <div class="chart-subtitle" id="timeline-subtitle"></div>
                <div id="timeline-chart"></div>
                <div class="legend" id="timeline-legend"></div>
            </div>
        </div>

        <div class="tiles">
            <div class="tile">
                <div class="tile-value">{total}</div>
                <div class="tile-label">Total Apostles</div>
            </div>
            <div class="tile">
                <div class="tile-value">{avg}</div>
                <div class="tile-label">Average Age</div>
            </div>
            <div class="tile">
                <div class="tile-value">{runs}</div>
                <div class="tile-label">Simulation Runs</div>
            </div>
        </div>

        <div class="disclaimer">
            <strong>Disclaimer:</strong> These probabilities are statistical estimates for educational
            purposes only. They do not represent official church doctrine or predictions. Apostolic
            succession is determined by seniority and inspiration, not probability.
        </div>
    </main>

    <footer class="site-footer">
        <div class="container">
            <div class="footer-grid">
                <div>
                    <h3>LatterDay Tools</h3>
                    <p>Data-driven insights and analytics for members of The Church of Jesus Christ
                    of Latter-day Saints. Statistical analysis, visualizations, and tools built with
                    modern technology.</p>
                </div>
                <div>
                    <h3>Tools</h3>
                    <ul>
                        <li><a href="https://prophet.latterdaytools.io">Prophet Calculator</a></li>
                        <li><a href="https://temples.latterdaytools.io">Temple Tracker</a></li>
                        <li><span style="color: var(--faint); font-size: 0.875rem;">Conference Analytics (Coming Soon)</span></li>
                    </ul>
                </div>
                <div>
                    <h3>Resources</h3>
                    <ul>
                        <li><a href="https://github.com/latterdaytools/prophet-tracker">GitHub</a></li>
                        <li><a href="https://latterdaytools.io/about">About</a></li>
                        <li><a href="https://latterdaytools.io/faq">FAQ</a></li>
                    </ul>
                </div>
            </div>
            <div class="footer-bottom">
                <span>© LatterDay Tools. Not affiliated with The Church of Jesus Christ of Latter-day Saints.</span>
                <span>
                    <a href="https://latterdaytools.io/privacy">Privacy</a>
                    <a href="https://latterdaytools.io/terms">Terms</a>
                </span>
            </div>
        </div>
    </footer>

    <div class="tooltip" id="tooltip"></div>

    <script>
    const page = {page_json};

    function setHeadings(desc, prefix) {{
        document.getElementById(prefix + '-title').textContent = desc.title;
        document.getElementById(prefix + '-subtitle').textContent = desc.subtitle;
    }}

    // Clip to a fixed axis domain; never rescale to the data
    function clamp(value, domain) {{
        return Math.max(domain[0], Math.min(domain[1], value));
    }}

    function tooltipHtml(fields) {{
        return fields.map(f => f.label
            ? `<div class="tip-row"><b>${{f.label}}:</b> ${{f.value}}</div>`
            : `<div class="tip-head">${{f.value}}</div>`
        ).join('');
    }}

    function showTooltip(event, html) {{
        const tooltip = document.getElementById('tooltip');
        tooltip.innerHTML = html;
        tooltip.classList.add('visible');
        tooltip.style.left = (event.pageX + 12) + 'px';
        tooltip.style.top = (event.pageY - 12) + 'px';
    }}

    function hideTooltip() {{
        document.getElementById('tooltip').classList.remove('visible');
    }}

    // Bar chart with gradient fill and bar-top labels
    function drawBarChart(desc, containerId, gradient) {{
        const container = document.getElementById(containerId);
        const margin = {{ top: 25, right: 15, bottom: 80, left: 40 }};
        const width = container.clientWidth - margin.left - margin.right;
        const height = 400 - margin.top - margin.bottom;
        const domain = desc.yAxis.domain;
        const points = desc.series[0].points;

        const svg = d3.select('#' + containerId)
            .append('svg')
            .attr('width', width + margin.left + margin.right)
            .attr('height', height + margin.top + margin.bottom)
            .append('g')
            .attr('transform', `translate(${{margin.left}},${{margin.top}})`);

        const defs = svg.append('defs');
        const grad = defs.append('linearGradient')
            .attr('id', containerId + '-grad')
            .attr('x1', 0).attr('y1', 0).attr('x2', 0).attr('y2', 1);
        grad.append('stop').attr('offset', '0%').attr('stop-color', gradient[0]);
        grad.append('stop').attr('offset', '100%').attr('stop-color', gradient[1]);

        const x = d3.scaleBand()
            .domain(points.map(p => p.x))
            .range([0, width])
            .padding(0.2);

        const y = d3.scaleLinear().domain(domain).range([height, 0]);

        svg.append('g')
            .call(d3.axisLeft(y).ticks(6))
            .style('color', '#6b7280');

        svg.append('g')
            .attr('transform', `translate(0,${{height}})`)
            .call(d3.axisBottom(x))
            .style('color', '#6b7280')
            .selectAll('text')
            .attr('transform', 'rotate(-45)')
            .style('text-anchor', 'end')
            .attr('dx', '-0.5em')
            .attr('dy', '0.4em');

        svg.selectAll('.bar')
            .data(points)
            .enter()
            .append('rect')
            .attr('x', p => x(p.x))
            .attr('width', x.bandwidth())
            .attr('y', p => y(clamp(p.y, domain)))
            .attr('height', p => height - y(clamp(p.y, domain)))
            .attr('rx', 4)
            .attr('fill', `url(#${{containerId}}-grad)`)
            .on('mouseover', (event, p) => showTooltip(event, tooltipHtml(p.tooltip)))
            .on('mouseout', hideTooltip);

        svg.selectAll('.bar-label')
            .data(points)
            .enter()
            .append('text')
            .attr('x', p => x(p.x) + x.bandwidth() / 2)
            .attr('y', p => y(clamp(p.y, domain)) - 6)
            .attr('text-anchor', 'middle')
            .style('font-size', '0.75rem')
            .style('font-weight', '700')
            .text(p => p.label);
    }}

    // Timeline line chart with era annotations
    function drawTimeline(desc) {{
        const container = document.getElementById('timeline-chart');
        const margin = {{ top: 46, right: 20, bottom: 30, left: 42 }};
        const width = container.clientWidth - margin.left - margin.right;
        const height = 500 - margin.top - margin.bottom;
        const domain = desc.yAxis.domain;
        const dates = desc.series.length ? desc.series[0].points.map(p => p.x) : [];

        const svg = d3.select('#timeline-chart')
            .append('svg')
            .attr('width', width + margin.left + margin.right)
            .attr('height', height + margin.top + margin.bottom)
            .append('g')
            .attr('transform', `translate(${{margin.left}},${{margin.top}})`);

        const x = d3.scalePoint().domain(dates).range([0, width]);
        const y = d3.scaleLinear().domain(domain).range([height, 0]);

        svg.append('g')
            .call(d3.axisLeft(y).ticks(5).tickFormat(v => v + (desc.yAxis.tickSuffix || '')))
            .style('color', '#6b7280');

        const ticks = desc.xAxis.ticks || [];
        const tickValues = ticks.map(t => t.value);
        const tickLabels = new Map(ticks.map(t => [t.value, t.label]));
        svg.append('g')
            .attr('transform', `translate(0,${{height}})`)
            .call(d3.axisBottom(x)
                .tickValues(tickValues)
                .tickFormat(v => tickLabels.get(v)))
            .style('color', '#6b7280');

        // Gridlines
        svg.append('g')
            .call(d3.axisLeft(y).ticks(5).tickSize(-width).tickFormat(''))
            .style('stroke-dasharray', '3,3')
            .style('stroke-opacity', 0.15);

        const line = d3.line()
            .x(p => x(p.x))
            .y(p => y(clamp(p.y, domain)));

        desc.series.forEach(series => {{
            svg.append('path')
                .datum(series.points)
                .attr('fill', 'none')
                .attr('stroke', series.color)
                .attr('stroke-width', 2)
                .attr('d', line);
        }});

        // Hover: values for every series at the nearest sample, high to low
        svg.append('rect')
            .attr('width', width)
            .attr('height', height)
            .attr('fill', 'transparent')
            .on('mousemove', function(event) {{
                const [mx] = d3.pointer(event);
                let nearest = 0;
                let best = Infinity;
                dates.forEach((d, i) => {{
                    const dist = Math.abs(x(d) - mx);
                    if (dist < best) {{ best = dist; nearest = i; }}
                }});
                const rows = desc.series
                    .map(s => ({{ name: s.name, color: s.color, point: s.points[nearest] }}))
                    .filter(r => r.point && r.point.y > 0.5)
                    .sort((a, b) => b.point.y - a.point.y);
                if (!rows.length) {{ hideTooltip(); return; }}
                const head = `<div class="tip-head">${{rows[0].point.tooltip[0].label}}</div>`;
                const body = rows.map(r =>
                    `<div class="tip-row"><span class="legend-dot" style="display:inline-block;background:${{r.color}}"></span> <b>${{r.name}}:</b> ${{r.point.tooltip[0].value}}</div>`
                ).join('');
                showTooltip(event, head + body);
            }})
            .on('mouseout', hideTooltip);

        // Era labels: name with a downward arrow at each run midpoint
        (desc.annotations || []).forEach(ann => {{
            const cx = x(ann.date);
            const cy = y(clamp(ann.probability, domain));
            if (cx === undefined) return;

            svg.append('text')
                .attr('x', cx)
                .attr('y', cy - 30)
                .attr('text-anchor', 'middle')
                .attr('fill', ann.color)
                .style('font-size', '11px')
                .style('font-weight', '700')
                .text(ann.name);
            svg.append('line')
                .attr('x1', cx).attr('y1', cy - 18)
                .attr('x2', cx).attr('y2', cy - 5)
                .attr('stroke', ann.color)
                .attr('stroke-width', 1.5);
            svg.append('polygon')
                .attr('points', `${{cx}},${{cy - 3}} ${{cx - 3.5}},${{cy - 9}} ${{cx + 3.5}},${{cy - 9}}`)
                .attr('fill', ann.color);
        }});

        // Legend in series (seniority) order
        const legend = document.getElementById('timeline-legend');
        desc.series.forEach(series => {{
            const item = document.createElement('div');
            item.className = 'legend-item';
            item.innerHTML = `<span class="legend-dot" style="background:${{series.color}}"></span>${{series.name}}`;
            legend.appendChild(item);
        }});
    }}

    setHeadings(page.ageChart, 'age');
    setHeadings(page.probabilityChart, 'probability');
    setHeadings(page.timelineChart, 'timeline');
    drawBarChart(page.ageChart, 'age-chart', ['#081D58', '#C7E9B4']);
    drawBarChart(page.probabilityChart, 'probability-chart', ['#0C4A6E', '#BAE6FD']);
    drawTimeline(page.timelineChart);
    </script>
</body>
</html>
"#,
        generated = format_timestamp(&page.generated_at),
        total = page.summary.total_apostles,
        avg = page.summary.average_age,
        runs = group_thousands(page.summary.simulation_runs),
        page_json = page_json
    )?;

    Ok(())
}

/// "March 1, 2026, 6:00 AM" from an RFC 3339 timestamp, falling back to the
/// raw string.
fn format_timestamp(s: &str) -> String {
    match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => dt.format("%B %-d, %Y, %-I:%M %p").to_string(),
        Err(_) => s.to_string(),
    }
}

/// 250000 -> "250,000" for the tile and info box.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
